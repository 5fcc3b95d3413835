//! LLM provider trait for text generation

use async_trait::async_trait;
use crate::error::Result;

/// Trait for LLM completion.
///
/// Deliberately narrow: the provider receives a fully rendered prompt and
/// returns text. Prompt assembly stays in the chain, so the orchestration is
/// independent of any specific provider.
///
/// Implementations:
/// - `GeminiGenerator`: hosted Gemini API (gemini-1.5-flash)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for a fully rendered prompt
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}

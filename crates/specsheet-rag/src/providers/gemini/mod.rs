//! Hosted Gemini providers (Generative Language API)
//!
//! One shared HTTP client carries the API key; the embedder and generator
//! wrap it for their respective endpoints.

mod client;
mod embedder;
mod generator;

pub use client::GeminiClient;
pub use embedder::GeminiEmbedder;
pub use generator::GeminiGenerator;

use std::sync::Arc;

use crate::config::GeminiConfig;
use crate::error::Result;

/// Combined provider sharing a single client for embeddings and generation
pub struct GeminiProvider {
    embedder: GeminiEmbedder,
    generator: GeminiGenerator,
}

impl GeminiProvider {
    /// Create a combined provider with an explicit API key
    pub fn with_key(config: &GeminiConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Arc::new(GeminiClient::new(api_key, config.base_url.clone())?);
        Ok(Self {
            embedder: GeminiEmbedder::new(Arc::clone(&client), config),
            generator: GeminiGenerator::new(client, config),
        })
    }

    /// Create a combined provider, reading the API key from the environment
    pub fn from_env(config: &GeminiConfig) -> Result<Self> {
        Self::with_key(config, GeminiConfig::api_key()?)
    }

    /// Split into separate providers
    pub fn split(self) -> (GeminiEmbedder, GeminiGenerator) {
        (self.embedder, self.generator)
    }
}

//! Provider abstractions for embeddings and LLM generation
//!
//! The chain talks to these traits only; the one production backend is the
//! hosted Gemini API.

pub mod embedding;
pub mod gemini;
pub mod llm;

pub use embedding::EmbeddingProvider;
pub use gemini::{GeminiEmbedder, GeminiGenerator, GeminiProvider};
pub use llm::LlmProvider;

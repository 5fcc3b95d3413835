//! specsheet-rag: Retrieval-augmented Q&A over a laptop spec sheet
//!
//! This crate loads a plain-text knowledge file, splits it into overlapping
//! chunks, embeds them through the Gemini API, and answers questions by
//! retrieving the closest chunks and prompting a Gemini chat model with
//! them. Questions outside the knowledge file get a fixed polite refusal.

pub mod chain;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod types;

pub use chain::{ChainCell, RetrievalQa};
pub use config::AssistantConfig;
pub use error::{Error, Result};
pub use generation::PromptBuilder;
pub use providers::{EmbeddingProvider, GeminiProvider, LlmProvider};
pub use retrieval::{SearchResult, VectorIndex};
pub use types::{Answer, Chunk, Document};

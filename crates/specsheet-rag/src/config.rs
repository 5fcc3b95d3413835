//! Configuration for the assistant

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Default Generative Language API endpoint
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Main assistant configuration
///
/// Every field has a default, so an empty (or absent) config file yields the
/// stock assistant: the Dell G15 5530 spec sheet in `knowledge.txt`, split
/// 1000/150, answered from the top 3 chunks by Gemini at temperature 0.7.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Knowledge file configuration
    pub knowledge: KnowledgeConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Gemini API configuration
    pub gemini: GeminiConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
}

impl AssistantConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            Error::config(format!("invalid config '{}': {}", path.display(), e))
        })
    }

    /// Load configuration from an optional file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

/// Knowledge file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Path to the plain-text knowledge file, relative to the working directory
    pub path: PathBuf,
    /// Subject the assistant answers questions about
    pub subject: String,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("knowledge.txt"),
            subject: "Dell G15 5530".to_string(),
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 150,
        }
    }
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API base URL (tests point this at a local mock server)
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Embedding dimensions
    pub dimensions: usize,
    /// Temperature for generation
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_API_URL.to_string(),
            embed_model: "embedding-001".to_string(),
            generate_model: "gemini-1.5-flash".to_string(),
            dimensions: 768,
            temperature: 0.7,
        }
    }
}

impl GeminiConfig {
    /// Read the API key from the environment
    pub fn api_key() -> Result<String> {
        std::env::var(API_KEY_ENV)
            .map_err(|_| Error::config(format!("{} is not set", API_KEY_ENV)))
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks supplied as context per question
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

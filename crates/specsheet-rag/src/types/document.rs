//! Document and chunk types

use serde::{Deserialize, Serialize};

/// The knowledge document, loaded once at startup and immutable thereafter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source filename
    pub filename: String,
    /// Full text content
    pub text: String,
    /// SHA-256 content hash (hex)
    pub content_hash: String,
    /// Content length in characters
    pub char_count: usize,
    /// Load timestamp
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document
    pub fn new(filename: String, text: String, content_hash: String) -> Self {
        let char_count = text.chars().count();
        Self {
            filename,
            text,
            content_hash,
            char_count,
            loaded_at: chrono::Utc::now(),
        }
    }
}

/// A contiguous slice of the knowledge document.
///
/// Chunks have no identity beyond position and content: consecutive chunks
/// overlap, and `content` is exactly the document text between `char_start`
/// and `char_end` (character offsets, trimmed of surrounding whitespace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content
    pub content: String,
    /// Chunk index within the document
    pub chunk_index: u32,
    /// Character offset where this chunk starts in the document text
    pub char_start: usize,
    /// Character offset one past the last character of this chunk
    pub char_end: usize,
}

impl Chunk {
    /// Content length in characters
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }
}

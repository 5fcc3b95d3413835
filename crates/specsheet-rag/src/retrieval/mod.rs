//! In-memory vector index and similarity search

mod index;

pub use index::{SearchResult, VectorIndex};

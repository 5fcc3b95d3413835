//! Knowledge file loading and chunking

mod loader;
mod splitter;

pub use loader::TextLoader;
pub use splitter::TextSplitter;

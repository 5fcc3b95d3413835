//! Plain-text knowledge file loader

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Document;

/// Loads the knowledge file into a [`Document`]
pub struct TextLoader;

impl TextLoader {
    /// Read a plain-text file and build the document record.
    ///
    /// The file is read as UTF-8 in one pass. A missing or unreadable file
    /// is an error; the caller decides whether that is fatal.
    pub fn load(path: &Path) -> Result<Document> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::knowledge(path.display().to_string(), e.to_string()))?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let content_hash = hash_content(&text);
        let document = Document::new(filename, text, content_hash);

        tracing::debug!(
            file = %document.filename,
            chars = document.char_count,
            hash = %document.content_hash,
            "loaded knowledge file"
        );

        Ok(document)
    }
}

/// Hash content for change detection
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_file_with_hash_and_counts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "RAM: 16GB\nStorage: 512GB SSD\n").unwrap();

        let doc = TextLoader::load(file.path()).unwrap();
        assert!(doc.text.contains("RAM: 16GB"));
        assert_eq!(doc.char_count, doc.text.chars().count());
        assert_eq!(doc.content_hash.len(), 64);
    }

    #[test]
    fn same_content_same_hash() {
        let mut a = tempfile::NamedTempFile::new().unwrap();
        let mut b = tempfile::NamedTempFile::new().unwrap();
        write!(a, "identical content").unwrap();
        write!(b, "identical content").unwrap();

        let doc_a = TextLoader::load(a.path()).unwrap();
        let doc_b = TextLoader::load(b.path()).unwrap();
        assert_eq!(doc_a.content_hash, doc_b.content_hash);
    }

    #[test]
    fn missing_file_is_knowledge_error() {
        let err = TextLoader::load(Path::new("does-not-exist.txt")).unwrap_err();
        assert!(matches!(err, Error::Knowledge { .. }));
    }
}

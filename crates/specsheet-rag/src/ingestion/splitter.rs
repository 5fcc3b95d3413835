//! Recursive character splitting with overlap

use std::collections::VecDeque;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::ChunkingConfig;
use crate::types::{Chunk, Document};

/// Separator cascade, coarsest first
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Recursive character splitter with configurable size and overlap.
///
/// Text is fragmented at paragraph breaks first; fragments still longer than
/// `chunk_size` are re-fragmented at line breaks, then spaces, then grapheme
/// boundaries. Fragments are merged greedily into chunks of at most
/// `chunk_size` characters, and the tail of each emitted chunk (up to
/// `chunk_overlap` characters of whole fragments) is carried into the next.
/// Splitting is a pure function of the text and the two parameters.
pub struct TextSplitter {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    chunk_overlap: usize,
}

/// A fragment no longer than `chunk_size`, as a byte range
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: usize,
    end: usize,
}

impl TextSplitter {
    /// Create a new splitter
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Create a splitter from the chunking configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Split a document into chunks
    pub fn split_document(&self, document: &Document) -> Vec<Chunk> {
        self.split(&document.text)
    }

    /// Split raw text into chunks
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let mut fragments = Vec::new();
        self.fragment_into(text, 0, 0, &mut fragments);

        let ranges = self.merge(text, fragments);

        let mut chunks = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            if let Some(chunk) = self.emit(text, start, end, chunks.len() as u32) {
                chunks.push(chunk);
            }
        }

        tracing::debug!(chunks = chunks.len(), "split text");
        chunks
    }

    /// Fragment text at the separator for `depth`, recursing into any piece
    /// still longer than `chunk_size`
    fn fragment_into(&self, text: &str, base: usize, depth: usize, out: &mut Vec<Fragment>) {
        if depth == SEPARATORS.len() {
            self.hard_split(text, base, out);
            return;
        }

        let sep = SEPARATORS[depth];
        let mut start = 0usize;
        for (idx, m) in text.match_indices(sep) {
            self.take_piece(&text[start..idx], base + start, depth, out);
            start = idx + m.len();
        }
        self.take_piece(&text[start..], base + start, depth, out);
    }

    fn take_piece(&self, piece: &str, base: usize, depth: usize, out: &mut Vec<Fragment>) {
        if piece.is_empty() {
            return;
        }
        if count_chars(piece) <= self.chunk_size {
            out.push(Fragment {
                start: base,
                end: base + piece.len(),
            });
        } else {
            self.fragment_into(piece, base, depth + 1, out);
        }
    }

    /// Last resort: split at grapheme boundaries into windows of at most
    /// `chunk_size` characters
    fn hard_split(&self, text: &str, base: usize, out: &mut Vec<Fragment>) {
        let mut start = 0usize;
        let mut end = 0usize;
        let mut chars = 0usize;

        for (idx, grapheme) in text.grapheme_indices(true) {
            let grapheme_chars = grapheme.chars().count();
            if chars > 0 && chars + grapheme_chars > self.chunk_size {
                out.push(Fragment {
                    start: base + start,
                    end: base + end,
                });
                start = idx;
                chars = 0;
            }
            chars += grapheme_chars;
            end = idx + grapheme.len();
        }

        if end > start {
            out.push(Fragment {
                start: base + start,
                end: base + end,
            });
        }
    }

    /// Merge fragments greedily into chunk ranges, carrying up to
    /// `chunk_overlap` characters of trailing fragments into the next chunk
    fn merge(&self, text: &str, fragments: Vec<Fragment>) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut window: VecDeque<Fragment> = VecDeque::new();

        for frag in fragments {
            if let (Some(front), Some(back)) = (window.front(), window.back()) {
                let grown = count_chars(&text[front.start..frag.end]);
                if grown > self.chunk_size {
                    ranges.push((front.start, back.end));

                    // keep a tail of at most chunk_overlap chars that still
                    // leaves room for the incoming fragment
                    loop {
                        let (front_start, back_end) = match (window.front(), window.back()) {
                            (Some(f), Some(b)) => (f.start, b.end),
                            _ => break,
                        };
                        let tail = count_chars(&text[front_start..back_end]);
                        let with_next = count_chars(&text[front_start..frag.end]);
                        if tail <= self.chunk_overlap && with_next <= self.chunk_size {
                            break;
                        }
                        window.pop_front();
                    }
                }
            }
            window.push_back(frag);
        }

        if let (Some(front), Some(back)) = (window.front(), window.back()) {
            ranges.push((front.start, back.end));
        }

        ranges
    }

    /// Trim a chunk range to non-whitespace bounds and build the chunk.
    /// Returns `None` for whitespace-only ranges.
    fn emit(&self, text: &str, start: usize, end: usize, chunk_index: u32) -> Option<Chunk> {
        let slice = &text[start..end];
        let lead = slice.len() - slice.trim_start().len();
        let trail = slice.len() - slice.trim_end().len();

        let trimmed_start = start + lead;
        let trimmed_end = end - trail;
        if trimmed_start >= trimmed_end {
            return None;
        }

        let content = text[trimmed_start..trimmed_end].to_string();
        let char_start = count_chars(&text[..trimmed_start]);
        let char_end = char_start + count_chars(&content);

        Some(Chunk {
            content,
            chunk_index,
            char_start,
            char_end,
        })
    }
}

fn count_chars(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_slice(text: &str, start: usize, end: usize) -> String {
        text.chars().skip(start).take(end - start).collect()
    }

    #[test]
    fn short_text_is_one_chunk() {
        let splitter = TextSplitter::new(1000, 150);
        let chunks = splitter.split("RAM: 16GB\nStorage: 512GB SSD");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "RAM: 16GB\nStorage: 512GB SSD");
        assert_eq!(chunks[0].char_start, 0);
        assert_eq!(chunks[0].chunk_index, 0);
    }

    #[test]
    fn chunks_respect_max_size() {
        let text = "word ".repeat(500);
        let splitter = TextSplitter::new(100, 20);

        for chunk in splitter.split(&text) {
            assert!(
                chunk.content.chars().count() <= 100,
                "chunk of {} chars exceeds chunk_size",
                chunk.content.chars().count()
            );
        }
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let text = "word ".repeat(500);
        let splitter = TextSplitter::new(100, 20);
        let chunks = splitter.split(&text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert!(
                pair[1].char_start < pair[0].char_end,
                "chunk {} does not overlap its predecessor",
                pair[1].chunk_index
            );
        }
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = "Processor details follow. ".repeat(120);
        let splitter = TextSplitter::new(300, 60);

        let first = splitter.split(&text);
        let second = splitter.split(&text);
        assert_eq!(first, second);
    }

    #[test]
    fn offsets_match_content() {
        let text = format!(
            "Écran: 15.6\" FHD 165Hz\n\n{}\n\nTrès bon clavier rétroéclairé.",
            "Le processeur Intel Core i7-13650HX est très rapide. ".repeat(30)
        );
        let splitter = TextSplitter::new(200, 40);
        let chunks = splitter.split(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(
                chunk.content,
                char_slice(&text, chunk.char_start, chunk.char_end)
            );
        }
    }

    #[test]
    fn paragraphs_split_at_boundary() {
        let para_one = "a".repeat(600);
        let para_two = "b".repeat(600);
        let text = format!("{}\n\n{}", para_one, para_two);

        let splitter = TextSplitter::new(1000, 150);
        let chunks = splitter.split(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, para_one);
        assert_eq!(chunks[1].content, para_two);
    }

    #[test]
    fn oversized_word_is_hard_split() {
        let word = "x".repeat(2500);
        let splitter = TextSplitter::new(1000, 150);
        let chunks = splitter.split(&word);

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 1000);
        }
        let rejoined: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rejoined, word);
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        let splitter = TextSplitter::new(1000, 150);
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("  \n\n \n  ").is_empty());
    }

    #[test]
    fn indices_are_sequential() {
        let text = "line\n".repeat(400);
        let splitter = TextSplitter::new(120, 30);
        let chunks = splitter.split(&text);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i as u32);
        }
    }
}

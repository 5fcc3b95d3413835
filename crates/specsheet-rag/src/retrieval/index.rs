//! Exhaustive cosine-similarity index over the knowledge chunks

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Chunk;

/// A retrieved chunk with its cosine similarity to the query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity in [-1, 1]
    pub similarity: f32,
}

#[derive(Debug)]
struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// In-memory vector index.
///
/// The corpus is a single spec sheet, a few dozen chunks at most, so every
/// query scans all entries. Built once at startup and never mutated.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index from chunks and their embeddings.
    ///
    /// All vectors must share one dimensionality; the first entry fixes it.
    pub fn build(items: Vec<(Chunk, Vec<f32>)>) -> Result<Self> {
        let dimensions = items.first().map(|(_, v)| v.len()).unwrap_or(0);

        let mut entries = Vec::with_capacity(items.len());
        for (chunk, vector) in items {
            if vector.len() != dimensions {
                return Err(Error::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
            entries.push(IndexEntry { chunk, vector });
        }

        tracing::debug!(entries = entries.len(), dimensions, "Vector index built");

        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Return the `top_k` chunks most similar to the query, best first.
    ///
    /// Every entry is returned a score; there is no similarity cutoff. With
    /// fewer than `top_k` entries, all of them come back.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        if !self.entries.is_empty() && query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                similarity: cosine_similarity(query, &entry.vector),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimensionality of the indexed vectors (0 when empty)
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str, index: u32) -> Chunk {
        Chunk {
            content: content.to_string(),
            chunk_index: index,
            char_start: 0,
            char_end: content.chars().count(),
        }
    }

    #[test]
    fn identical_vectors_score_one() {
        let similarity = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let similarity = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(similarity.abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_score_negative_one() {
        let similarity = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((similarity + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn build_rejects_mixed_dimensions() {
        let items = vec![
            (chunk("a", 0), vec![1.0, 0.0]),
            (chunk("b", 1), vec![1.0, 0.0, 0.0]),
        ];

        let err = VectorIndex::build(items).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn search_orders_by_similarity() {
        let items = vec![
            (chunk("east", 0), vec![1.0, 0.0]),
            (chunk("north", 1), vec![0.0, 1.0]),
            (chunk("northeast", 2), vec![1.0, 1.0]),
        ];
        let index = VectorIndex::build(items).unwrap();

        let results = index.search(&[1.0, 0.0], 2).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.content, "east");
        assert_eq!(results[1].chunk.content, "northeast");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[test]
    fn search_returns_everything_when_index_is_small() {
        let items = vec![(chunk("only", 0), vec![1.0, 0.0])];
        let index = VectorIndex::build(items).unwrap();

        let results = index.search(&[0.0, 1.0], 3).unwrap();

        assert_eq!(results.len(), 1);
    }

    #[test]
    fn search_rejects_query_of_wrong_dimension() {
        let items = vec![(chunk("a", 0), vec![1.0, 0.0])];
        let index = VectorIndex::build(items).unwrap();

        let err = index.search(&[1.0, 0.0, 0.0], 3).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_index_searches_empty() {
        let index = VectorIndex::build(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.search(&[1.0, 0.0], 3).unwrap().is_empty());
    }
}

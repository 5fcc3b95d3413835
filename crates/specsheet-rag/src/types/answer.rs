//! Answer type returned by the chain

use crate::retrieval::SearchResult;

/// An answer produced for one question.
///
/// Carries the generated text together with the chunks that were supplied
/// as context, whether the model refused, and how long the whole exchange
/// took. One `Answer` exists per question; nothing is persisted.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Generated answer text
    pub text: String,
    /// Chunks supplied as context, with similarity scores, retrieval order
    pub sources: Vec<SearchResult>,
    /// True iff the text equals the configured refusal message
    pub refused: bool,
    /// Wall-clock time to produce the answer
    pub elapsed_ms: u64,
}

//! Prompt template for spec-sheet question answering

use crate::retrieval::SearchResult;

/// Prompt builder for retrieval-grounded queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunk texts in retrieval order, separated by blank lines
    pub fn build_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// The literal apology the model is instructed to answer with when a
    /// question falls outside the provided context.
    ///
    /// The chain compares answers against this string to flag refusals, so
    /// the wording here and in the prompt must stay identical.
    pub fn refusal_message(subject: &str) -> String {
        format!(
            "I'm sorry, I can only answer questions based on the provided specifications for the {}.",
            subject
        )
    }

    /// Build the full grounded prompt.
    ///
    /// The refusal instruction is soft: the model's own judgment enforces
    /// it, so it must not be treated as a security boundary.
    pub fn build_prompt(subject: &str, question: &str, context: &str) -> String {
        format!(
            r#"You are a helpful AI assistant for answering questions about the {subject} laptop.
You must follow these rules strictly:
1. Only use the information provided in the context below to answer the question.
2. If the context does not contain the answer, or if the user asks a question unrelated to the laptop, you MUST respond with: "{refusal}"
3. Do not answer any harmful, unethical, or inappropriate questions. Refuse politely by using the response from rule #2.

Context: {context}
Question: {question}

Answer:"#,
            subject = subject,
            refusal = Self::refusal_message(subject),
            context = context,
            question = question
        )
    }
}

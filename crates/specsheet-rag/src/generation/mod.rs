//! Prompt construction for the generation call

mod prompt;

pub use prompt::PromptBuilder;

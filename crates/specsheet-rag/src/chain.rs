//! The question-answering chain and its process-wide cache

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;

use crate::config::AssistantConfig;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::ingestion::{TextLoader, TextSplitter};
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::retrieval::VectorIndex;
use crate::types::Answer;

/// The assembled question-answering chain.
///
/// `build` runs the whole ingestion pipeline: load the knowledge file,
/// split it, embed every chunk, index the vectors. After that the chain is
/// read-only; each question flows embed, search, prompt, generate.
pub struct RetrievalQa {
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    index: VectorIndex,
    subject: String,
    top_k: usize,
}

impl std::fmt::Debug for RetrievalQa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalQa")
            .field("index", &self.index)
            .field("subject", &self.subject)
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

impl RetrievalQa {
    /// Build the chain from the configured knowledge file
    pub async fn build(
        config: &AssistantConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let start = Instant::now();

        let document = TextLoader::load(&config.knowledge.path)?;
        let chunks = TextSplitter::from_config(&config.chunking).split_document(&document);

        if chunks.is_empty() {
            return Err(Error::knowledge(
                config.knowledge.path.display().to_string(),
                "no chunks produced, file is empty or whitespace",
            ));
        }

        tracing::info!(
            file = %document.filename,
            chars = document.char_count,
            chunks = chunks.len(),
            "Knowledge file chunked"
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        let index = VectorIndex::build(chunks.into_iter().zip(vectors).collect())?;

        tracing::info!(
            chunks = index.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Chain built"
        );

        Ok(Self {
            embedder,
            llm,
            index,
            subject: config.knowledge.subject.clone(),
            top_k: config.retrieval.top_k,
        })
    }

    /// Answer one question against the indexed knowledge.
    ///
    /// An empty question is rejected before any provider call. The model
    /// receives only the retrieved chunks as context; there is no
    /// similarity cutoff, the top matches go in regardless of score.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::EmptyQuestion);
        }

        let start = Instant::now();
        tracing::info!("Question: \"{}\"", question);

        let query_vector = self.embedder.embed(question).await?;
        let sources = self.index.search(&query_vector, self.top_k)?;

        let context = PromptBuilder::build_context(&sources);
        let prompt = PromptBuilder::build_prompt(&self.subject, question, &context);

        let text = self.llm.complete(&prompt).await?;

        let refused = text.trim() == PromptBuilder::refusal_message(&self.subject);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        tracing::info!(elapsed_ms, refused, "Question answered");

        Ok(Answer {
            text,
            sources,
            refused,
            elapsed_ms,
        })
    }

    /// Subject the assistant answers questions about
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Number of indexed chunks
    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }
}

/// Build-once cache for the chain.
///
/// The first `get_or_build` constructs the chain; every later call returns
/// the same instance. The initializer runs at most once even under
/// concurrent callers. A failed build leaves the cell empty so the next
/// call can try again.
pub struct ChainCell {
    cell: OnceCell<Arc<RetrievalQa>>,
}

impl ChainCell {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached chain, building it on first use
    pub async fn get_or_build(
        &self,
        config: &AssistantConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Arc<RetrievalQa>> {
        let chain = self
            .cell
            .get_or_try_init(|| async move {
                RetrievalQa::build(config, embedder, llm)
                    .await
                    .map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(chain))
    }
}

impl Default for ChainCell {
    fn default() -> Self {
        Self::new()
    }
}

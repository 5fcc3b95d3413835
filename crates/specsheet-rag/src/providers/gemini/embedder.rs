//! Embedding provider backed by the Gemini `embedContent` endpoints

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::providers::embedding::EmbeddingProvider;

use super::client::GeminiClient;

/// The batch endpoint accepts at most 100 documents per call
const BATCH_LIMIT: usize = 100;

/// Gemini embedding provider (embedding-001, 768 dimensions)
pub struct GeminiEmbedder {
    client: Arc<GeminiClient>,
    model: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    content: RequestContent,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedRequest>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

impl GeminiEmbedder {
    pub fn new(client: Arc<GeminiClient>, config: &GeminiConfig) -> Self {
        Self {
            client,
            model: config.embed_model.clone(),
            dimensions: config.dimensions,
        }
    }

    /// The request body names the model again, prefixed per API convention
    fn request_for(&self, text: &str) -> EmbedRequest {
        EmbedRequest {
            model: format!("models/{}", self.model),
            content: RequestContent {
                parts: vec![RequestPart {
                    text: text.to_string(),
                }],
            },
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.client.action_url(&self.model, "embedContent");

        let response = self
            .client
            .http()
            .post(&url)
            .json(&self.request_for(text))
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Gemini embed request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Invalid embed response: {}", e)))?;

        Ok(parsed.embedding.values)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = self.client.action_url(&self.model, "batchEmbedContents");
        let mut vectors = Vec::with_capacity(texts.len());

        for window in texts.chunks(BATCH_LIMIT) {
            tracing::debug!(count = window.len(), "Embedding batch");

            let request = BatchEmbedRequest {
                requests: window.iter().map(|t| self.request_for(t)).collect(),
            };

            let response = self
                .client
                .http()
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| Error::embedding(format!("Gemini batch embed failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::embedding(format!(
                    "Gemini API error {}: {}",
                    status, body
                )));
            }

            let parsed: BatchEmbedResponse = response
                .json()
                .await
                .map_err(|e| Error::embedding(format!("Invalid batch embed response: {}", e)))?;

            if parsed.embeddings.len() != window.len() {
                return Err(Error::embedding(format!(
                    "Expected {} embeddings, got {}",
                    window.len(),
                    parsed.embeddings.len()
                )));
            }

            vectors.extend(parsed.embeddings.into_iter().map(|e| e.values));
        }

        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.model_reachable(&self.model).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

//! Chat completion provider backed by the Gemini `generateContent` endpoint

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::providers::llm::LlmProvider;

use super::client::GeminiClient;

/// Gemini chat provider (gemini-1.5-flash)
pub struct GeminiGenerator {
    client: Arc<GeminiClient>,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiGenerator {
    pub fn new(client: Arc<GeminiClient>, config: &GeminiConfig) -> Self {
        Self {
            client,
            model: config.generate_model.clone(),
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.client.action_url(&self.model, "generateContent");

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .http()
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!("Gemini API error {}: {}", status, body)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Invalid Gemini response: {}", e)))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::llm("No text in Gemini response"))
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.model_reachable(&self.model).await
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn generator(base_url: String) -> GeminiGenerator {
        let config = GeminiConfig {
            base_url,
            ..GeminiConfig::default()
        };
        let client = Arc::new(GeminiClient::new("test-key", config.base_url.clone()).unwrap());
        GeminiGenerator::new(client, &config)
    }

    #[tokio::test]
    async fn complete_sends_temperature_and_returns_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-1.5-flash:generateContent")
                    .query_param("key", "test-key")
                    .json_body(json!({
                        "contents": [
                            {"role": "user", "parts": [{"text": "Question: RAM?"}]}
                        ],
                        "generationConfig": {"temperature": 0.7}
                    }));
                then.status(200).json_body(json!({
                    "candidates": [
                        {"content": {"role": "model", "parts": [{"text": "16GB"}]}}
                    ]
                }));
            })
            .await;

        let answer = generator(server.base_url())
            .complete("Question: RAM?")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(answer, "16GB");
    }

    #[tokio::test]
    async fn empty_candidates_is_llm_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-1.5-flash:generateContent");
                then.status(200).json_body(json!({"candidates": []}));
            })
            .await;

        let err = generator(server.base_url()).complete("hi").await.unwrap_err();

        assert!(matches!(err, Error::Llm(_)));
        assert!(err.to_string().contains("No text"));
    }

    #[tokio::test]
    async fn api_error_is_llm_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-1.5-flash:generateContent");
                then.status(400).body("invalid request");
            })
            .await;

        let err = generator(server.base_url()).complete("hi").await.unwrap_err();

        assert!(matches!(err, Error::Llm(_)));
        assert!(err.to_string().contains("400"));
    }
}

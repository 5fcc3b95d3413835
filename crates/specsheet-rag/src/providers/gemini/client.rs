//! Shared HTTP plumbing for the Generative Language API

use reqwest::Client;

use crate::config::{GeminiConfig, API_KEY_ENV};
use crate::error::{Error, Result};

/// Shared Gemini HTTP client: one connection pool, one API key.
///
/// The key travels as a `key` query parameter, the authentication scheme of
/// the Generative Language API. Debug output omits the key so it stays out
/// of logs.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client with an explicit API key and base URL
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::config(format!("{} is empty", API_KEY_ENV)));
        }

        Ok(Self {
            http: Client::new(),
            api_key,
            base_url: base_url.into(),
        })
    }

    /// Create a client from configuration, reading the key from the environment
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        Self::new(GeminiConfig::api_key()?, config.base_url.clone())
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// URL for a model action, e.g. `models/embedding-001:embedContent`
    pub(crate) fn action_url(&self, model: &str, action: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, action, self.api_key
        )
    }

    /// Probe a model's metadata endpoint.
    ///
    /// Transport failures report unhealthy rather than erroring, so startup
    /// health checks can warn and continue.
    pub(crate) async fn model_reachable(&self, model: &str) -> Result<bool> {
        let url = format!("{}/models/{}?key={}", self.base_url, model, self.api_key);

        match self.http.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn rejects_blank_api_key() {
        let err = GeminiClient::new("   ", "http://localhost").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn action_url_carries_key_as_query_param() {
        let client = GeminiClient::new("k123", "https://example.test/v1beta").unwrap();
        assert_eq!(
            client.action_url("embedding-001", "embedContent"),
            "https://example.test/v1beta/models/embedding-001:embedContent?key=k123"
        );
    }

    #[tokio::test]
    async fn model_reachable_reflects_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/models/gemini-1.5-flash")
                    .query_param("key", "test-key");
                then.status(200);
            })
            .await;

        let client = GeminiClient::new("test-key", server.base_url()).unwrap();
        assert!(client.model_reachable("gemini-1.5-flash").await.unwrap());
        assert!(!client.model_reachable("no-such-model").await.unwrap());
    }

    #[tokio::test]
    async fn unreachable_host_reports_unhealthy() {
        let client = GeminiClient::new("test-key", "http://127.0.0.1:1").unwrap();
        assert!(!client.model_reachable("gemini-1.5-flash").await.unwrap());
    }
}

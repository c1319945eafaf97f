use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use wsic_core::traits::EmbeddingProvider;

/// Adapter for an OpenAI-style `/embeddings` HTTP endpoint.
///
/// Per the degrade-gracefully policy, every failure mode — network error,
/// non-2xx status, malformed body, wrong dimensionality — is reported as
/// `None`, never as an error. Callers fall back to lexical-only search.
pub struct RemoteProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    dim: usize,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

impl RemoteProvider {
    pub fn new(endpoint: String, api_key: Option<String>, model: String, dim: usize) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint,
            api_key,
            model,
            dim,
        }
    }

    /// Construct from `APP_EMBED_*` environment variables. Fails only when
    /// no endpoint is configured at all.
    pub fn from_env() -> anyhow::Result<Self> {
        let endpoint = std::env::var("APP_EMBED_ENDPOINT")
            .map_err(|_| anyhow::anyhow!("APP_EMBED_ENDPOINT is not set"))?;
        let api_key = std::env::var("APP_EMBED_API_KEY").ok();
        let model =
            std::env::var("APP_EMBED_MODEL").unwrap_or_else(|_| "text-embedding-3-small".into());
        let dim = std::env::var("APP_EMBED_DIM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(crate::DEFAULT_DIM);
        Ok(Self::new(endpoint, api_key, model, dim))
    }

    async fn request(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let body = serde_json::json!({ "model": self.model, "input": [text] });
        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await?.error_for_status()?;
        let parsed: EmbeddingsResponse = resp.json().await?;
        let row = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty embeddings response"))?;
        if row.embedding.len() != self.dim {
            anyhow::bail!(
                "embedding dimensionality mismatch: got {}, expected {}",
                row.embedding.len(),
                self.dim
            );
        }
        Ok(row.embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for RemoteProvider {
    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        match self.request(text).await {
            Ok(vector) => Some(vector),
            Err(e) => {
                tracing::warn!(error = %e, "embedding call failed; degrading to no vector");
                None
            }
        }
    }
}

//! OpenAI-compatible embeddings client
//!
//! Endpoint: POST {base_url}/embeddings

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::errors::{Result, TenderError};
use crate::http;

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Embeddings client for OpenAI and compatible services
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(client: Client, base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(TenderError::embedding("cannot embed empty text"));
        }

        let url = http::endpoint(&self.base_url, "embeddings");
        tracing::debug!(model = %self.model, chars = text.len(), "requesting embedding");

        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TenderError::embedding(format!("Failed to send request: {}", e)))?;

        let response = http::check_status(response)
            .await
            .map_err(TenderError::embedding)?;

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| TenderError::embedding(format!("Failed to parse response: {}", e)))?;

        body.data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| TenderError::embedding("response contained no embeddings"))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Embeddings request body
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Embeddings response body
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn embedder() -> OpenAiEmbedder {
        let client = http::build_client(Duration::from_secs(5)).unwrap();
        OpenAiEmbedder::new(client, "http://127.0.0.1:9", "sk-test", DEFAULT_EMBEDDING_MODEL)
    }

    #[test]
    fn test_embedder_configuration() {
        let embedder = embedder();
        assert_eq!(embedder.model_name(), "text-embedding-ada-002");
    }

    #[tokio::test]
    async fn test_empty_text_rejected_without_request() {
        let err = embedder().embed("   ").await.unwrap_err();
        assert!(matches!(err, TenderError::Embedding { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_embedding_error() {
        // Port 9 (discard) is not listening in test environments
        let err = embedder().embed("road works").await.unwrap_err();
        assert!(matches!(err, TenderError::Embedding { .. }));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"object":"list","data":[{"object":"embedding","index":0,"embedding":[0.1,-0.2,0.3]}],"model":"text-embedding-ada-002"}"#;
        let parsed: EmbeddingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data[0].embedding, vec![0.1, -0.2, 0.3]);
    }
}

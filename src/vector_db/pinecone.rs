//! Pinecone REST index client
//!
//! Endpoints on the index host:
//! - POST /query
//! - POST /describe_index_stats
//!
//! Endpoint on the control plane, used to find the host of a named index:
//! - GET /indexes/{name}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::{collect_matches, RawMatch, SimilarityMatch, VectorIndex, CONTENT_FIELD};
use crate::errors::{Result, TenderError};
use crate::http;

/// Pinecone control plane serving index descriptions
pub const DEFAULT_CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

/// Control-plane URL describing the index called `name`
pub fn describe_index_url(control_plane_url: &str, name: &str) -> String {
    http::endpoint(control_plane_url, &format!("indexes/{}", name))
}

/// Client for a single Pinecone index
#[derive(Debug, Clone)]
pub struct PineconeIndex {
    client: Client,
    host: String,
    api_key: String,
}

impl PineconeIndex {
    /// Create a client for the index served at `host`
    pub fn new(client: Client, host: &str, api_key: &str) -> Self {
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };

        Self {
            client,
            host,
            api_key: api_key.to_string(),
        }
    }

    /// Look up the data-plane host of index `name` and connect to it
    pub async fn resolve(client: Client, control_plane_url: &str, name: &str, api_key: &str) -> Result<Self> {
        let url = describe_index_url(control_plane_url, name);
        tracing::debug!(index = %name, url = %url, "resolving pinecone index host");

        let response = client
            .get(&url)
            .header("Api-Key", api_key)
            .send()
            .await
            .map_err(|e| TenderError::search(format!("Failed to describe index {}: {}", name, e)))?;

        let description: IndexDescription = http::check_status(response)
            .await
            .map_err(|e| TenderError::search(format!("Failed to describe index {}: {}", name, e)))?
            .json()
            .await
            .map_err(|e| TenderError::search(format!("Failed to parse index description: {}", e)))?;

        if description.host.trim().is_empty() {
            return Err(TenderError::search(format!("index {} has no host yet", name)));
        }

        Ok(Self::new(client, &description.host, api_key))
    }

    /// Get index host URL
    pub fn host(&self) -> &str {
        &self.host
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = http::endpoint(&self.host, path);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| TenderError::search(format!("Failed to send request: {}", e)))?;

        http::check_status(response).await.map_err(TenderError::search)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SimilarityMatch>> {
        if top_k == 0 {
            return Err(TenderError::search("top_k must be a positive integer"));
        }

        tracing::debug!(top_k, dimensions = vector.len(), "querying pinecone");

        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let body: QueryResponse = self
            .post("query", &request)
            .await?
            .json()
            .await
            .map_err(|e| TenderError::search(format!("Failed to parse response: {}", e)))?;

        let raw = body
            .matches
            .into_iter()
            .map(|m| RawMatch {
                content: m.metadata.as_ref().and_then(content_of),
                id: m.id,
                score: m.score,
            })
            .collect();

        Ok(collect_matches(raw, top_k))
    }

    async fn total_records(&self) -> Result<u64> {
        let stats: IndexStats = self
            .post("describe_index_stats", &serde_json::json!({}))
            .await?
            .json()
            .await
            .map_err(|e| TenderError::search(format!("Failed to parse index stats: {}", e)))?;

        Ok(stats.total_vector_count)
    }
}

fn content_of(metadata: &Map<String, JsonValue>) -> Option<String> {
    metadata
        .get(CONTENT_FIELD)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

/// Query request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

/// Query response body
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Map<String, JsonValue>>,
}

/// Control-plane index description, reduced to the field we use
#[derive(Debug, Deserialize)]
struct IndexDescription {
    #[serde(default)]
    host: String,
}

/// Index statistics response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexStats {
    #[serde(default)]
    total_vector_count: u64,
}

//! Qdrant index client
//!
//! Reference sections live in one collection; the section text is stored
//! in the `content` payload field.

use async_trait::async_trait;
use qdrant_client::{
    client::QdrantClient,
    qdrant::{with_payload_selector::SelectorOptions, SearchPoints, Value as QdrantValue, WithPayloadSelector},
};

use super::{collect_matches, RawMatch, SimilarityMatch, VectorIndex, CONTENT_FIELD};
use crate::errors::{Result, TenderError};

/// Client for a Qdrant collection of reference tenders
pub struct QdrantIndex {
    client: QdrantClient,
    collection: String,
}

impl QdrantIndex {
    /// Connect to the Qdrant server at `url` (gRPC port, e.g. http://localhost:6334)
    pub fn new(url: &str, collection: &str) -> Result<Self> {
        let client = QdrantClient::from_url(url)
            .build()
            .map_err(|e| TenderError::ConfigError(format!("Failed to create Qdrant client: {}", e)))?;

        Ok(Self {
            client,
            collection: collection.to_string(),
        })
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SimilarityMatch>> {
        if top_k == 0 {
            return Err(TenderError::search("top_k must be a positive integer"));
        }

        tracing::debug!(collection = %self.collection, top_k, "querying qdrant");

        let search_result = self
            .client
            .search_points(&SearchPoints {
                collection_name: self.collection.clone(),
                vector: vector.to_vec(),
                limit: top_k as u64,
                with_payload: Some(WithPayloadSelector {
                    selector_options: Some(SelectorOptions::Enable(true)),
                }),
                ..Default::default()
            })
            .await
            .map_err(|e| TenderError::search(format!("Failed to search points: {}", e)))?;

        let raw = search_result
            .result
            .into_iter()
            .map(|point| RawMatch {
                id: point_id_to_string(&point.id),
                score: point.score,
                content: point.payload.get(CONTENT_FIELD).and_then(qdrant_value_to_string),
            })
            .collect();

        Ok(collect_matches(raw, top_k))
    }

    async fn total_records(&self) -> Result<u64> {
        let info = self
            .client
            .collection_info(&self.collection)
            .await
            .map_err(|e| TenderError::search(format!("Failed to get collection info: {}", e)))?;

        Ok(info.result.and_then(|r| r.points_count).unwrap_or(0))
    }
}

fn qdrant_value_to_string(value: &QdrantValue) -> Option<String> {
    use qdrant_client::qdrant::value::Kind;

    match value.kind.as_ref()? {
        Kind::StringValue(s) => Some(s.clone()),
        _ => None,
    }
}

fn point_id_to_string(point_id: &Option<qdrant_client::qdrant::PointId>) -> String {
    use qdrant_client::qdrant::point_id::PointIdOptions;

    match point_id.as_ref().and_then(|id| id.point_id_options.as_ref()) {
        Some(PointIdOptions::Num(n)) => n.to_string(),
        Some(PointIdOptions::Uuid(u)) => u.clone(),
        None => "unknown".to_string(),
    }
}

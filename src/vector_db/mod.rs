//! Similarity search over the reference tender index
//!
//! Two backends are available: Pinecone over REST and Qdrant over gRPC.
//! Both return the `content` text stored with each reference section.

pub mod pinecone;
pub mod qdrant;

pub use pinecone::PineconeIndex;
pub use qdrant::QdrantIndex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Number of reference sections retrieved per query
pub const DEFAULT_TOP_K: usize = 3;

/// Metadata field holding the reference text
pub const CONTENT_FIELD: &str = "content";

/// A reference section returned by the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    pub id: String,
    pub score: f32,
    pub content: String,
}

/// Read-only nearest-neighbour index
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return at most `top_k` matches, most relevant first
    ///
    /// Failures surface as [`crate::TenderError::Search`] and are never retried.
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SimilarityMatch>>;

    /// Total number of records stored in the index
    async fn total_records(&self) -> Result<u64>;
}

/// A raw hit before its metadata has been checked
#[derive(Debug, Clone)]
pub(crate) struct RawMatch {
    pub id: String,
    pub score: f32,
    pub content: Option<String>,
}

/// Drop hits without text content, sort by descending score, cap at `top_k`
pub(crate) fn collect_matches(raw: Vec<RawMatch>, top_k: usize) -> Vec<SimilarityMatch> {
    let mut matches: Vec<SimilarityMatch> = raw
        .into_iter()
        .filter_map(|hit| match hit.content {
            Some(content) => Some(SimilarityMatch {
                id: hit.id,
                score: hit.score,
                content,
            }),
            None => {
                tracing::warn!(id = %hit.id, "skipping match without text content");
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(top_k);
    matches
}

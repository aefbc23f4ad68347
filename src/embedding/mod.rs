//! Text embedding clients
//!
//! Converts a search query into the vector used for similarity search.

pub mod openai;

pub use openai::{OpenAiEmbedder, DEFAULT_EMBEDDING_MODEL};

use async_trait::async_trait;

use crate::errors::Result;

/// Anything that can turn text into an embedding vector
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single non-empty text
    ///
    /// Failures surface as [`crate::TenderError::Embedding`] and are never retried.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Name of the embedding model
    fn model_name(&self) -> &str;
}

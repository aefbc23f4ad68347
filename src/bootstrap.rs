//! Startup wiring
//!
//! Builds the external API handles once per process and injects them into
//! the tender generator.

use std::sync::Arc;

use crate::config::{Config, Credentials, IndexBackend};
use crate::embedding::OpenAiEmbedder;
use crate::errors::{Result, TenderError};
use crate::generation::{OpenAiChatClient, SectionGenerator};
use crate::http;
use crate::orchestrator::TenderGenerator;
use crate::vector_db::pinecone::describe_index_url;
use crate::vector_db::{PineconeIndex, QdrantIndex, VectorIndex};

/// Long-lived service handles shared by every request
#[derive(Clone)]
pub struct Services {
    pub generator: TenderGenerator,
    pub index: Arc<dyn VectorIndex>,
}

impl Services {
    /// Construct every client from configuration and credentials
    ///
    /// A Pinecone index without a configured host is resolved by name here,
    /// so this makes one control-plane request in that case.
    pub async fn connect(config: &Config, credentials: &Credentials) -> Result<Self> {
        config.validate()?;

        let client = http::build_client(config.http_timeout())?;

        let embedder = Arc::new(OpenAiEmbedder::new(
            client.clone(),
            &config.openai.base_url,
            &credentials.openai_api_key,
            &config.openai.embedding_model,
        ));

        let chat = Arc::new(OpenAiChatClient::new(
            client.clone(),
            &config.openai.base_url,
            &credentials.openai_api_key,
            &config.openai.chat_model,
        ));

        let index = open_index(config, credentials.pinecone_api_key.as_deref(), client).await?;

        let sections = SectionGenerator::with_params(chat, config.openai.temperature, config.openai.max_tokens);
        let generator = TenderGenerator::with_top_k(embedder, index.clone(), sections, config.index.top_k);

        tracing::debug!(backend = ?config.index.backend, "service handles ready");

        Ok(Self { generator, index })
    }
}

/// Construct only the vector index, for commands that never embed or generate
pub async fn connect_index(config: &Config, pinecone_api_key: Option<&str>) -> Result<Arc<dyn VectorIndex>> {
    config.validate()?;
    let client = http::build_client(config.http_timeout())?;
    open_index(config, pinecone_api_key, client).await
}

/// Where the Pinecone client will point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PineconeTarget {
    /// Configured data-plane host
    Host(String),
    /// Control-plane URL describing the named index
    Lookup(String),
}

impl PineconeTarget {
    pub fn from_config(config: &Config) -> Self {
        match &config.index.host {
            Some(host) => PineconeTarget::Host(host.clone()),
            None => PineconeTarget::Lookup(describe_index_url(
                &config.index.control_plane_url,
                &config.index.collection,
            )),
        }
    }
}

async fn open_index(
    config: &Config,
    pinecone_api_key: Option<&str>,
    client: reqwest::Client,
) -> Result<Arc<dyn VectorIndex>> {
    let index: Arc<dyn VectorIndex> = match config.index.backend {
        IndexBackend::Pinecone => {
            let api_key = pinecone_api_key.ok_or_else(|| {
                TenderError::ConfigError("Pinecone backend requires an API key".to_string())
            })?;
            let pinecone = match PineconeTarget::from_config(config) {
                PineconeTarget::Host(host) => PineconeIndex::new(client, &host, api_key),
                PineconeTarget::Lookup(_) => {
                    PineconeIndex::resolve(
                        client,
                        &config.index.control_plane_url,
                        &config.index.collection,
                        api_key,
                    )
                    .await?
                }
            };
            tracing::debug!(host = %pinecone.host(), "pinecone index ready");
            Arc::new(pinecone)
        }
        IndexBackend::Qdrant => {
            let host = config.index.host.as_deref().ok_or_else(|| {
                TenderError::ConfigError("qdrant backend requires an index host".to_string())
            })?;
            Arc::new(QdrantIndex::new(host, &config.index.collection)?)
        }
    };

    Ok(index)
}

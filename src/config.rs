//! Configuration management for tendergen
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.tendergen/config.toml
//!
//! API keys are never read from or written to the file. They come from
//! `OPENAI_API_KEY` and `PINECONE_API_KEY`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::embedding::DEFAULT_EMBEDDING_MODEL;
use crate::errors::{Result, TenderError};
use crate::generation::{DEFAULT_CHAT_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::vector_db::{pinecone::DEFAULT_CONTROL_PLANE_URL, DEFAULT_TOP_K};

/// Environment variable holding the OpenAI API key
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the Pinecone API key
pub const PINECONE_API_KEY_VAR: &str = "PINECONE_API_KEY";

/// Complete configuration for tendergen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub index: IndexConfig,
    pub http: HttpConfig,
}

/// Embedding and chat completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Which vector index serves the reference tenders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    Pinecone,
    Qdrant,
}

/// Vector index connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub backend: IndexBackend,
    /// Data-plane host (Pinecone) or gRPC URL (Qdrant)
    ///
    /// Optional for Pinecone: when absent the host is looked up from
    /// `collection` through the control plane. Required for Qdrant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Index name (Pinecone) or collection name (Qdrant)
    pub collection: String,
    /// Pinecone control plane used to resolve `collection` to a host
    pub control_plane_url: String,
    pub top_k: usize,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: IndexBackend::Pinecone,
            host: None,
            collection: "tender-documents".to_string(),
            control_plane_url: DEFAULT_CONTROL_PLANE_URL.to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TenderError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| TenderError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tendergen").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.index.top_k == 0 {
            return Err(TenderError::ConfigError(
                "top_k must be greater than 0".to_string(),
            ));
        }

        if self.index.collection.trim().is_empty() {
            return Err(TenderError::ConfigError(
                "index collection must not be empty".to_string(),
            ));
        }

        match self.index.host.as_deref() {
            Some(host) if host.trim().is_empty() => {
                return Err(TenderError::ConfigError(
                    "index host must not be empty".to_string(),
                ));
            }
            None if self.index.backend == IndexBackend::Qdrant => {
                return Err(TenderError::ConfigError(
                    "qdrant backend requires an index host".to_string(),
                ));
            }
            None if self.index.control_plane_url.trim().is_empty() => {
                return Err(TenderError::ConfigError(
                    "control_plane_url must not be empty when no index host is set".to_string(),
                ));
            }
            _ => {}
        }

        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err(TenderError::ConfigError(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.openai.max_tokens == 0 {
            return Err(TenderError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(TenderError::ConfigError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TenderError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TenderError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TenderError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// HTTP timeout for every outbound call
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

/// API keys read from the environment
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai_api_key: String,
    pub pinecone_api_key: Option<String>,
}

impl Credentials {
    /// Read keys for the configured backend
    ///
    /// The OpenAI key is always required; the Pinecone key only when the
    /// Pinecone backend is selected.
    pub fn from_env(backend: IndexBackend) -> Result<Self> {
        let openai_api_key = read_key(OPENAI_API_KEY_VAR)
            .ok_or_else(|| TenderError::ConfigError(format!("{} is not set", OPENAI_API_KEY_VAR)))?;

        Ok(Self {
            openai_api_key,
            pinecone_api_key: Self::index_key_from_env(backend)?,
        })
    }

    /// Read only the key the vector index needs
    pub fn index_key_from_env(backend: IndexBackend) -> Result<Option<String>> {
        let pinecone_api_key = read_key(PINECONE_API_KEY_VAR);
        if backend == IndexBackend::Pinecone && pinecone_api_key.is_none() {
            return Err(TenderError::ConfigError(format!(
                "{} is not set",
                PINECONE_API_KEY_VAR
            )));
        }
        Ok(pinecone_api_key)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &mask_secret(&self.openai_api_key))
            .field(
                "pinecone_api_key",
                &self.pinecone_api_key.as_deref().map(mask_secret),
            )
            .finish()
    }
}

fn read_key(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Show only the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

//! Error types for tendergen
//!
//! Every pipeline stage (embedding, similarity search, section generation)
//! has its own variant so callers can tell which external call failed.

use thiserror::Error;

/// Main error type for tender generation
#[derive(Error, Debug)]
pub enum TenderError {
    /// Embedding endpoint failures
    #[error("Embedding error: {message}")]
    Embedding { message: String },

    /// Vector index failures
    #[error("Search error: {message}")]
    Search { message: String },

    /// Chat completion failures while drafting a section
    #[error("Generation error in {section}: {message}")]
    Generation { section: String, message: String },

    /// Rejected project details
    #[error("Invalid project details: {0}")]
    InvalidProject(String),

    /// A document that does not hold every section exactly once
    #[error("Incomplete tender document: {0}")]
    IncompleteDocument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TenderError {
    pub fn embedding(message: impl Into<String>) -> Self {
        TenderError::Embedding {
            message: message.into(),
        }
    }

    pub fn search(message: impl Into<String>) -> Self {
        TenderError::Search {
            message: message.into(),
        }
    }

    pub fn generation(section: impl Into<String>, message: impl Into<String>) -> Self {
        TenderError::Generation {
            section: section.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for tender operations
pub type Result<T> = std::result::Result<T, TenderError>;

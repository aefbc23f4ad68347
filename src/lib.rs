//! tendergen - Tender Document Generator
//!
//! Drafts the six fixed sections of a procurement tender. For every section
//! the generator embeds a query, retrieves similar sections from past
//! tenders in a vector index, and asks a chat model to write the section
//! for the new project.
//!
//! # Architecture
//!
//! - **embedding**: text -> vector (OpenAI-compatible)
//! - **vector_db**: vector -> reference sections (Pinecone or Qdrant)
//! - **generation**: prompt building and chat completion
//! - **orchestrator**: the sequential section loop with progress reporting
//! - **types**: project details, sections, and the assembled document

pub mod errors;
pub mod types;
pub mod http;
pub mod embedding;
pub mod vector_db;
pub mod generation;
pub mod progress;
pub mod orchestrator;

// Re-export commonly used types
pub use errors::{Result, TenderError};
pub use orchestrator::TenderGenerator;
pub use types::{ProjectDetails, Section, TenderDocument};

// Application layer
pub mod config;
pub mod bootstrap;
pub mod cli;

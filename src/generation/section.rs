//! Section generator: prompt in, drafted section out

use std::sync::Arc;

use super::client::{ChatMessage, CompletionClient, CompletionRequest};
use super::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::errors::{Result, TenderError};
use crate::types::{ProjectDetails, Section};
use crate::vector_db::SimilarityMatch;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion length limit in tokens
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Drafts one tender section per completion call
#[derive(Clone)]
pub struct SectionGenerator {
    client: Arc<dyn CompletionClient>,
    temperature: f32,
    max_tokens: u32,
}

impl SectionGenerator {
    /// Create with default sampling parameters
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self::with_params(client, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
    }

    /// Create with custom sampling parameters
    pub fn with_params(client: Arc<dyn CompletionClient>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            client,
            temperature,
            max_tokens,
        }
    }

    /// The completion request sent for a section
    pub fn request_for(
        &self,
        section: Section,
        details: &ProjectDetails,
        matches: &[SimilarityMatch],
    ) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(section, details, matches)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Draft `section` for the project, grounded on `matches`
    ///
    /// Exactly one completion call is made. Any failure is returned as
    /// [`TenderError::Generation`] without retry.
    pub async fn generate_section(
        &self,
        section: Section,
        details: &ProjectDetails,
        matches: &[SimilarityMatch],
    ) -> Result<String> {
        let request = self.request_for(section, details, matches);

        self.client
            .complete(request)
            .await
            .map_err(|message| TenderError::generation(section.title(), message))
    }

    /// Name of the underlying chat model
    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

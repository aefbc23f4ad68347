//! Tender orchestrator
//!
//! Walks the fixed section list one section at a time:
//! query -> embed -> search -> generate -> record -> report.
//! The first failure aborts the run; no partial document is returned.

use std::sync::Arc;

use crate::embedding::Embedder;
use crate::errors::Result;
use crate::generation::SectionGenerator;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::types::{ProjectDetails, Section, TenderDocument};
use crate::vector_db::{VectorIndex, DEFAULT_TOP_K};

/// Search query used to find reference material for a section
pub fn search_query(section: Section, details: &ProjectDetails) -> String {
    format!("{} {} {}", section, details.title(), details.description())
}

/// Generates complete tender documents from project details
///
/// Client handles are injected once and shared read-only by every run.
#[derive(Clone)]
pub struct TenderGenerator {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    sections: SectionGenerator,
    top_k: usize,
}

impl TenderGenerator {
    /// Create with the default number of reference sections per query
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>, sections: SectionGenerator) -> Self {
        Self::with_top_k(embedder, index, sections, DEFAULT_TOP_K)
    }

    /// Create with a custom number of reference sections per query
    pub fn with_top_k(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        sections: SectionGenerator,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            sections,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Generate every section of the tender in order
    ///
    /// `progress.finish()` is called exactly once before returning, on
    /// success and on failure.
    pub async fn generate_document(
        &self,
        details: &ProjectDetails,
        progress: &mut dyn ProgressReporter,
    ) -> Result<TenderDocument> {
        let result = self.run_sections(details, progress).await;
        progress.finish();

        match &result {
            Ok(_) => tracing::info!(title = %details.title(), "tender generation completed"),
            Err(e) => tracing::error!(title = %details.title(), error = %e, "tender generation failed"),
        }

        result
    }

    async fn run_sections(
        &self,
        details: &ProjectDetails,
        progress: &mut dyn ProgressReporter,
    ) -> Result<TenderDocument> {
        let total = Section::COUNT;
        let mut entries = Vec::with_capacity(total);
        tracing::info!(
            embedding_model = %self.embedder.model_name(),
            chat_model = %self.sections.model_name(),
            top_k = self.top_k,
            "starting tender generation"
        );

        for (idx, section) in Section::ALL.iter().copied().enumerate() {
            progress.section_started(section);
            tracing::info!(section = %section, "generating section");

            let text = self.generate_one(section, details).await?;
            entries.push((section, text));

            progress.report(&ProgressEvent {
                completed: idx + 1,
                total,
                section,
                status: format!("Generated {}", section),
            });
        }

        TenderDocument::from_entries(entries)
    }

    async fn generate_one(&self, section: Section, details: &ProjectDetails) -> Result<String> {
        let query = search_query(section, details);
        let vector = self.embedder.embed(&query).await?;
        let matches = self.index.search(&vector, self.top_k).await?;
        tracing::debug!(section = %section, matches = matches.len(), "retrieved reference sections");

        self.sections.generate_section(section, details, &matches).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_scenario() {
        let details = ProjectDetails::new(
            "Road Upgrade",
            "Sector 9",
            6,
            Some(String::new()),
            "Resurface 4km road",
        )
        .unwrap();
        assert_eq!(
            search_query(Section::ScopeOfWork, &details),
            "SCOPE OF WORK Road Upgrade Resurface 4km road"
        );
        assert_eq!(details.budget(), "Not specified");
    }
}

//! In-memory stand-ins for the external APIs

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use tendergen::embedding::Embedder;
use tendergen::generation::{CompletionClient, CompletionRequest, SectionGenerator};
use tendergen::vector_db::{SimilarityMatch, VectorIndex};
use tendergen::{Result, TenderError, TenderGenerator};

/// Embedder that records queries and can fail on the n-th call (1-based)
#[derive(Default)]
pub struct MockEmbedder {
    pub queries: Mutex<Vec<String>>,
    pub fail_on: Option<usize>,
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut queries = self.queries.lock().unwrap();
        queries.push(text.to_string());
        if self.fail_on == Some(queries.len()) {
            return Err(TenderError::embedding("embedding service unavailable"));
        }
        Ok(vec![text.len() as f32, 0.5, -0.5])
    }

    fn model_name(&self) -> &str {
        "mock-embedding"
    }
}

/// Index that returns fixed matches and can fail on the n-th call
#[derive(Default)]
pub struct MockIndex {
    pub matches: Vec<SimilarityMatch>,
    pub top_ks: Mutex<Vec<usize>>,
    pub fail_on: Option<usize>,
}

impl MockIndex {
    pub fn with_matches(contents: &[&str]) -> Self {
        let matches = contents
            .iter()
            .enumerate()
            .map(|(idx, content)| SimilarityMatch {
                id: format!("ref-{}", idx),
                score: 1.0 - idx as f32 * 0.1,
                content: content.to_string(),
            })
            .collect();
        Self {
            matches,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.top_ks.lock().unwrap().len()
    }
}

#[async_trait]
impl VectorIndex for MockIndex {
    async fn search(&self, _vector: &[f32], top_k: usize) -> Result<Vec<SimilarityMatch>> {
        let mut top_ks = self.top_ks.lock().unwrap();
        top_ks.push(top_k);
        if self.fail_on == Some(top_ks.len()) {
            return Err(TenderError::search("index unavailable"));
        }
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }

    async fn total_records(&self) -> Result<u64> {
        Ok(self.matches.len() as u64)
    }
}

/// Completion client that echoes the section it was asked for
#[derive(Default)]
pub struct MockCompletion {
    pub requests: Mutex<Vec<CompletionRequest>>,
    pub fail_on: Option<usize>,
}

impl MockCompletion {
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.messages[1].content.clone())
            .collect()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<String, String> {
        let mut requests = self.requests.lock().unwrap();
        let prompt = request.messages[1].content.clone();
        requests.push(request);
        if self.fail_on == Some(requests.len()) {
            return Err("HTTP 500: model overloaded".to_string());
        }
        let heading = prompt
            .split("Generate the ")
            .nth(1)
            .and_then(|rest| rest.split(" section").next())
            .unwrap_or("UNKNOWN");
        Ok(format!("Drafted {} (call {})", heading, requests.len()))
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}

/// A generator wired to the given mocks
pub fn generator(
    embedder: &Arc<MockEmbedder>,
    index: &Arc<MockIndex>,
    completion: &Arc<MockCompletion>,
) -> TenderGenerator {
    TenderGenerator::new(
        embedder.clone(),
        index.clone(),
        SectionGenerator::new(completion.clone()),
    )
}

//! End-to-end tender generation against mocked external services

mod common;

use std::sync::Arc;

use common::{generator, MockCompletion, MockEmbedder, MockIndex};
use quickcheck_macros::quickcheck;
use tendergen::progress::ProgressRecorder;
use tendergen::{ProjectDetails, Section, TenderDocument, TenderError};

fn road_upgrade() -> ProjectDetails {
    ProjectDetails::new(
        "Road Upgrade",
        "Sector 9",
        6,
        Some(String::new()),
        "Resurface 4km road",
    )
    .unwrap()
}

fn references() -> MockIndex {
    MockIndex::with_matches(&[
        "Sealed tenders are invited from eligible contractors.",
        "The work shall be completed within the stipulated period.",
        "Earnest money deposit of 2% is payable.",
        "Never returned: beyond top_k.",
    ])
}

#[tokio::test]
async fn test_complete_run_produces_all_sections_in_order() {
    let embedder = Arc::new(MockEmbedder::default());
    let index = Arc::new(references());
    let completion = Arc::new(MockCompletion::default());
    let mut progress = ProgressRecorder::new();

    let document = generator(&embedder, &index, &completion)
        .generate_document(&road_upgrade(), &mut progress)
        .await
        .unwrap();

    let sections: Vec<Section> = document.iter().map(|(s, _)| s).collect();
    assert_eq!(sections, Section::ALL.to_vec());
    for (idx, (section, text)) in document.iter().enumerate() {
        assert_eq!(text, format!("Drafted {} (call {})", section, idx + 1));
    }

    assert_eq!(embedder.queries.lock().unwrap().len(), 6);
    assert_eq!(index.calls(), 6);
    assert_eq!(completion.calls(), 6);
    assert!(index.top_ks.lock().unwrap().iter().all(|k| *k == 3));
}

#[tokio::test]
async fn test_progress_events_and_single_release() {
    let embedder = Arc::new(MockEmbedder::default());
    let index = Arc::new(references());
    let completion = Arc::new(MockCompletion::default());
    let mut progress = ProgressRecorder::new();

    generator(&embedder, &index, &completion)
        .generate_document(&road_upgrade(), &mut progress)
        .await
        .unwrap();

    let expected: Vec<f64> = (1..=6).map(|n| n as f64 / 6.0).collect();
    assert_eq!(progress.fractions(), expected);
    assert_eq!(progress.started, Section::ALL.to_vec());
    for (event, section) in progress.events.iter().zip(Section::ALL) {
        assert_eq!(event.section, section);
        assert!(event.status.contains(section.title()));
    }
    assert_eq!(progress.finish_count, 1);
}

#[tokio::test]
async fn test_search_query_and_budget_scenario() {
    let embedder = Arc::new(MockEmbedder::default());
    let index = Arc::new(references());
    let completion = Arc::new(MockCompletion::default());

    generator(&embedder, &index, &completion)
        .generate_document(&road_upgrade(), &mut ProgressRecorder::new())
        .await
        .unwrap();

    let queries = embedder.queries.lock().unwrap();
    assert_eq!(
        queries[Section::ScopeOfWork.index()],
        "SCOPE OF WORK Road Upgrade Resurface 4km road"
    );
    assert!(completion
        .prompts()
        .iter()
        .all(|p| p.contains("Budget: Not specified")));
}

#[tokio::test]
async fn test_prompts_number_matches_in_relevance_order() {
    let embedder = Arc::new(MockEmbedder::default());
    let index = Arc::new(references());
    let completion = Arc::new(MockCompletion::default());

    generator(&embedder, &index, &completion)
        .generate_document(&road_upgrade(), &mut ProgressRecorder::new())
        .await
        .unwrap();

    let prompt = &completion.prompts()[0];
    assert!(prompt.contains("Example 1:\nSealed tenders are invited"));
    assert!(prompt.contains("Example 3:\nEarnest money deposit"));
    assert!(!prompt.contains("Example 4"));
    assert!(!prompt.contains("beyond top_k"));
}

#[tokio::test]
async fn test_zero_matches_still_generates_every_section() {
    let embedder = Arc::new(MockEmbedder::default());
    let index = Arc::new(MockIndex::default());
    let completion = Arc::new(MockCompletion::default());

    let document = generator(&embedder, &index, &completion)
        .generate_document(&road_upgrade(), &mut ProgressRecorder::new())
        .await
        .unwrap();

    assert_eq!(document.iter().count(), 6);
    assert_eq!(completion.calls(), 6);
    for prompt in completion.prompts() {
        assert!(!prompt.contains("Example"));
        assert!(prompt.contains("Title: Road Upgrade"));
    }
}

#[tokio::test]
async fn test_embedding_failure_in_third_section_aborts() {
    let embedder = Arc::new(MockEmbedder {
        fail_on: Some(3),
        ..Default::default()
    });
    let index = Arc::new(references());
    let completion = Arc::new(MockCompletion::default());
    let mut progress = ProgressRecorder::new();

    let result = generator(&embedder, &index, &completion)
        .generate_document(&road_upgrade(), &mut progress)
        .await;

    assert!(matches!(result, Err(TenderError::Embedding { .. })));
    assert_eq!(embedder.queries.lock().unwrap().len(), 3);
    assert_eq!(index.calls(), 2);
    assert_eq!(completion.calls(), 2);
    assert_eq!(progress.events.len(), 2);
    assert_eq!(progress.finish_count, 1);
}

#[tokio::test]
async fn test_search_failure_in_third_section_aborts() {
    let embedder = Arc::new(MockEmbedder::default());
    let index = Arc::new(MockIndex {
        fail_on: Some(3),
        ..references()
    });
    let completion = Arc::new(MockCompletion::default());
    let mut progress = ProgressRecorder::new();

    let result = generator(&embedder, &index, &completion)
        .generate_document(&road_upgrade(), &mut progress)
        .await;

    assert!(matches!(result, Err(TenderError::Search { .. })));
    assert_eq!(embedder.queries.lock().unwrap().len(), 3);
    assert_eq!(index.calls(), 3);
    assert_eq!(completion.calls(), 2);
    assert_eq!(progress.started.len(), 3);
    assert_eq!(progress.finish_count, 1);
}

#[tokio::test]
async fn test_generation_failure_in_third_section_aborts() {
    let embedder = Arc::new(MockEmbedder::default());
    let index = Arc::new(references());
    let completion = Arc::new(MockCompletion {
        fail_on: Some(3),
        ..Default::default()
    });
    let mut progress = ProgressRecorder::new();

    let result = generator(&embedder, &index, &completion)
        .generate_document(&road_upgrade(), &mut progress)
        .await;

    match result {
        Err(TenderError::Generation { section, message }) => {
            assert_eq!(section, "INSTRUCTION TO BIDDERS");
            assert!(message.contains("overloaded"));
        }
        other => panic!("expected generation error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(embedder.queries.lock().unwrap().len(), 3);
    assert_eq!(completion.calls(), 3);
    assert_eq!(progress.events.len(), 2);
    assert_eq!(progress.finish_count, 1);
}

#[tokio::test]
async fn test_exports_are_deterministic_and_round_trip() {
    let mut documents = Vec::new();
    for _ in 0..2 {
        let embedder = Arc::new(MockEmbedder::default());
        let index = Arc::new(references());
        let completion = Arc::new(MockCompletion::default());
        documents.push(
            generator(&embedder, &index, &completion)
                .generate_document(&road_upgrade(), &mut ProgressRecorder::new())
                .await
                .unwrap(),
        );
    }

    assert_eq!(documents[0].to_text(), documents[1].to_text());
    let json = documents[0].to_json().unwrap();
    assert_eq!(json, documents[1].to_json().unwrap());
    assert_eq!(TenderDocument::from_json(&json).unwrap(), documents[0]);

    let text = documents[0].to_text();
    assert!(text.starts_with("# NOTICE INVITING TENDER\n\nDrafted NOTICE INVITING TENDER"));
    assert!(text.contains("\n\n# PRICE BID\n\n"));
}

#[quickcheck]
fn prop_every_valid_project_yields_six_sections(title: String, description: String, fail_on: u8) -> bool {
    if title.trim().is_empty() || description.trim().is_empty() {
        return true;
    }
    let details = match ProjectDetails::new(title, "Somewhere", 3, None, description) {
        Ok(details) => details,
        Err(_) => return false,
    };

    // 0 never fails; 7..=9 are past the last completion call
    let fail_on = (fail_on % 10) as usize;
    let embedder = Arc::new(MockEmbedder::default());
    let index = Arc::new(references());
    let completion = Arc::new(MockCompletion {
        fail_on: if fail_on == 0 { None } else { Some(fail_on) },
        ..Default::default()
    });
    let mut progress = ProgressRecorder::new();

    let result = tokio_test::block_on(
        generator(&embedder, &index, &completion).generate_document(&details, &mut progress),
    );

    if progress.finish_count != 1 {
        return false;
    }
    match result {
        Ok(document) => {
            let in_order = document.iter().map(|(s, _)| s).eq(Section::ALL.iter().copied());
            in_order && (fail_on == 0 || fail_on > Section::COUNT)
        }
        Err(TenderError::Generation { .. }) => (1..=Section::COUNT).contains(&fail_on),
        Err(_) => false,
    }
}

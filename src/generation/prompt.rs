//! Prompt construction for section drafting

use crate::types::{ProjectDetails, Section};
use crate::vector_db::SimilarityMatch;

/// System role framing sent with every section request
pub const SYSTEM_PROMPT: &str = "You are an expert tender document generator.";

/// Number the retrieved sections in the order received
///
/// Returns an empty string when there are no matches.
pub fn build_context(matches: &[SimilarityMatch]) -> String {
    matches
        .iter()
        .enumerate()
        .map(|(idx, m)| format!("Example {}:\n{}", idx + 1, m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the user prompt for one section
///
/// Without retrieved context the prompt makes no mention of reference
/// material at all.
pub fn build_prompt(section: Section, details: &ProjectDetails, matches: &[SimilarityMatch]) -> String {
    let context = build_context(matches);

    let project = format!(
        "Project Details:\n\
         Title: {}\n\
         Location: {}\n\
         Duration: {} months\n\
         Budget: {}\n\
         Description: {}",
        details.title(),
        details.location(),
        details.duration_months(),
        details.budget(),
        details.description(),
    );

    if context.is_empty() {
        format!(
            "You are an expert tender document writer. Generate the {section} section \
             for a new tender based on the following project details.\n\n\
             {project}\n\n\
             Please generate a professional and detailed {section} section that is \
             specific to this project. The content should be practical, clear, and legally sound."
        )
    } else {
        format!(
            "You are an expert tender document writer. Generate the {section} section \
             for a new tender based on the following project details and example sections.\n\n\
             {project}\n\n\
             Similar Examples from Other Tenders:\n\
             {context}\n\n\
             Please generate a professional and detailed {section} section that follows \
             the style and format of the examples while being specific to this project. \
             The content should be practical, clear, and legally sound."
        )
    }
}

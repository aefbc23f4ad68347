//! Type definitions module
//!
//! Project input, the fixed section list, and the assembled document.

pub mod document;
pub mod project;
pub mod section;

// Re-export commonly used types
pub use document::{export_file_stem, TenderDocument};
pub use project::{ProjectDetails, DEFAULT_DURATION_MONTHS, UNSPECIFIED_BUDGET};
pub use section::Section;

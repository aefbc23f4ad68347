//! Project metadata submitted for a tender
//!
//! Built once per generation request and never mutated afterwards.

use crate::errors::{Result, TenderError};

/// Budget recorded when the user leaves the field empty
pub const UNSPECIFIED_BUDGET: &str = "Not specified";

/// Default project duration offered by the form
pub const DEFAULT_DURATION_MONTHS: u32 = 12;

/// Details of the project being tendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    title: String,
    location: String,
    duration_months: u32,
    budget: String,
    description: String,
}

impl ProjectDetails {
    /// Validate and normalize form input
    ///
    /// Title, location and description must be non-blank and the duration
    /// must be at least one month. A missing or blank budget becomes
    /// [`UNSPECIFIED_BUDGET`].
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        duration_months: u32,
        budget: Option<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let title = title.into();
        let location = location.into();
        let description = description.into();

        let mut missing = Vec::new();
        if title.trim().is_empty() {
            missing.push("title");
        }
        if location.trim().is_empty() {
            missing.push("location");
        }
        if description.trim().is_empty() {
            missing.push("description");
        }
        if !missing.is_empty() {
            return Err(TenderError::InvalidProject(format!(
                "required fields are empty: {}",
                missing.join(", ")
            )));
        }

        if duration_months == 0 {
            return Err(TenderError::InvalidProject(
                "duration must be at least 1 month".to_string(),
            ));
        }

        Ok(Self {
            title,
            location,
            duration_months,
            budget: normalize_budget(budget),
            description,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn duration_months(&self) -> u32 {
        self.duration_months
    }

    pub fn budget(&self) -> &str {
        &self.budget
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn normalize_budget(budget: Option<String>) -> String {
    match budget {
        Some(b) if !b.trim().is_empty() => b,
        _ => UNSPECIFIED_BUDGET.to_string(),
    }
}

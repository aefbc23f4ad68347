//! Tender document sections
//!
//! The six sections of a tender, in the order they are generated and shown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TenderError;

/// One named part of a tender document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "NOTICE INVITING TENDER")]
    NoticeInvitingTender,
    #[serde(rename = "BRIEF INTRODUCTION")]
    BriefIntroduction,
    #[serde(rename = "INSTRUCTION TO BIDDERS")]
    InstructionToBidders,
    #[serde(rename = "SCOPE OF WORK")]
    ScopeOfWork,
    #[serde(rename = "TERMS AND CONDITIONS")]
    TermsAndConditions,
    #[serde(rename = "PRICE BID")]
    PriceBid,
}

impl Section {
    /// All sections in generation order
    pub const ALL: [Section; 6] = [
        Section::NoticeInvitingTender,
        Section::BriefIntroduction,
        Section::InstructionToBidders,
        Section::ScopeOfWork,
        Section::TermsAndConditions,
        Section::PriceBid,
    ];

    /// Number of sections in a complete tender
    pub const COUNT: usize = Self::ALL.len();

    /// Heading used in prompts, search queries and exports
    pub fn title(&self) -> &'static str {
        match self {
            Section::NoticeInvitingTender => "NOTICE INVITING TENDER",
            Section::BriefIntroduction => "BRIEF INTRODUCTION",
            Section::InstructionToBidders => "INSTRUCTION TO BIDDERS",
            Section::ScopeOfWork => "SCOPE OF WORK",
            Section::TermsAndConditions => "TERMS AND CONDITIONS",
            Section::PriceBid => "PRICE BID",
        }
    }

    /// Zero-based position in `Section::ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Section {
    type Err = TenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.title() == s)
            .ok_or_else(|| TenderError::IncompleteDocument(format!("Unknown section: {}", s)))
    }
}

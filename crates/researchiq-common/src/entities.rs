//! The normalized paper record persisted by the store and returned by every
//! paper-bearing endpoint.

use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";
pub const NO_ABSTRACT: &str = "No abstract available";
pub const UNKNOWN_YEAR: &str = "Unknown";

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSource {
    Arxiv,
}

impl PaperSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperSource::Arxiv => "arxiv",
        }
    }
}

// ---------------------------------------------------------------------------
// Paper record
// ---------------------------------------------------------------------------

/// All four fields are always present. Absent upstream data is resolved to
/// the sentinel constants above before a record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub published_year: String, // 4 chars or "Unknown"
    pub source: String,
}

impl PaperRecord {
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        published_year: impl Into<String>,
        source: PaperSource,
    ) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            published_year: published_year.into(),
            source: source.as_str().to_string(),
        }
    }
}

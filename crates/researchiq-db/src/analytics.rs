//! Read-only aggregation and filtering over stored papers.

use researchiq_common::PaperRecord;
use std::collections::BTreeMap;

/// Number of records per distinct `published_year`, sentinel years included.
pub fn yearly_count(records: &[PaperRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.published_year.clone()).or_insert(0) += 1;
    }
    counts
}

/// Optional, conjunctive criteria. An absent criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperFilter {
    /// Exact, case-sensitive match on `published_year`.
    pub year: Option<String>,
    /// Case-insensitive substring of title or abstract.
    pub keyword: Option<String>,
}

impl PaperFilter {
    pub fn by_year(year: impl Into<String>) -> Self {
        Self { year: Some(year.into()), keyword: None }
    }

    pub fn by_keyword(keyword: impl Into<String>) -> Self {
        Self { year: None, keyword: Some(keyword.into()) }
    }

    pub fn matches(&self, record: &PaperRecord) -> bool {
        if let Some(year) = &self.year {
            if record.published_year != *year {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            let needle = keyword.to_lowercase();
            return record.title.to_lowercase().contains(&needle)
                || record.abstract_text.to_lowercase().contains(&needle);
        }
        true
    }
}

/// Records passing `filter`, append order kept.
pub fn filter_papers(records: Vec<PaperRecord>, filter: &PaperFilter) -> Vec<PaperRecord> {
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

//! Aggregation and filtering over stored papers. Read-only.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use researchiq_common::PaperRecord;
use researchiq_db::PaperFilter;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct YearlyCountResponse {
    pub yearly_counts: BTreeMap<String, usize>,
}

/// GET /analytics/yearly-count - Stored papers per publication year
pub async fn yearly_count(State(state): State<SharedState>) -> Json<YearlyCountResponse> {
    Json(YearlyCountResponse {
        yearly_counts: state.store.yearly_count().await,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub year: Option<String>,
    pub keyword: Option<String>,
}

impl FilterParams {
    /// `?year=` with no value means "no year filter".
    fn into_filter(self) -> PaperFilter {
        PaperFilter {
            year: self.year.filter(|y| !y.is_empty()),
            keyword: self.keyword.filter(|k| !k.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub count: usize,
    pub papers: Vec<PaperRecord>,
}

/// GET /analytics/filter - Stored papers by exact year and/or keyword
pub async fn filter_papers(
    State(state): State<SharedState>,
    Query(params): Query<FilterParams>,
) -> Json<FilterResponse> {
    let papers = state.store.filter(&params.into_filter()).await;
    Json(FilterResponse { count: papers.len(), papers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_params_mean_no_filter() {
        let params = FilterParams { year: Some(String::new()), keyword: Some(String::new()) };
        assert_eq!(params.into_filter(), PaperFilter::default());
    }

    #[test]
    fn test_params_pass_through_unchanged() {
        let params = FilterParams { year: Some("2023".into()), keyword: Some("Deep".into()) };
        let filter = params.into_filter();
        assert_eq!(filter.year.as_deref(), Some("2023"));
        assert_eq!(filter.keyword.as_deref(), Some("Deep"));
    }
}

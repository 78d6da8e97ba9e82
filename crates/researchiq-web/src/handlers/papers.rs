//! Fetch-and-store endpoint: search upstream, persist, echo the new records.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use researchiq_common::PaperRecord;

use crate::error::ApiError;
use crate::state::SharedState;

pub const DEFAULT_QUERY: &str = "ai";
pub const DEFAULT_MAX_RESULTS: usize = 5;

fn default_query() -> String { DEFAULT_QUERY.to_string() }
fn default_max_results() -> usize { DEFAULT_MAX_RESULTS }

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub query: String,
    pub count: usize,
    pub papers: Vec<PaperRecord>,
    pub message: String,
}

/// GET /papers/arxiv - Search arXiv and append the results to the store
pub async fn fetch_arxiv_papers(
    State(state): State<SharedState>,
    Query(params): Query<FetchParams>,
) -> Result<Json<FetchResponse>, ApiError> {
    let source = state.source.name();
    let papers = state
        .source
        .search(&params.query, params.max_results)
        .await
        .map_err(|e| ApiError::from_source(source, e))?;

    let total = state.store.append_and_save(&papers).await?;

    info!(
        query = %params.query,
        fetched = papers.len(),
        total,
        "Papers fetched and stored"
    );

    Ok(Json(FetchResponse {
        query: params.query,
        count: papers.len(),
        papers,
        message: format!("Papers saved to {}", state.store.path().display()),
    }))
}

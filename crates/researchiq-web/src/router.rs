//! Axum router: maps all URL paths to handlers.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    system::read_root,
    papers::fetch_arxiv_papers,
    analytics::{filter_papers, yearly_count},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/",                       get(read_root))
        .route("/papers/arxiv",           get(fetch_arxiv_papers))
        .route("/analytics/yearly-count", get(yearly_count))
        .route("/analytics/filter",       get(filter_papers))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

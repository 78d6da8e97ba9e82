//! Shared application state for the web server.

use std::sync::Arc;
use researchiq_db::PaperStore;
use researchiq_ingestion::sources::LiteratureSource;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub store: PaperStore,
    pub source: Arc<dyn LiteratureSource>,
}

impl AppState {
    pub fn new(store: PaperStore, source: Arc<dyn LiteratureSource>) -> Self {
        Self { store, source }
    }
}

pub type SharedState = Arc<AppState>;

//! Literature source clients.

pub mod arxiv;

use async_trait::async_trait;
use researchiq_common::{PaperRecord, Result};

/// Common interface for literature source clients.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    /// Human-readable source name used in error payloads.
    fn name(&self) -> &'static str;

    /// Search for papers matching a query, returns normalized records.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<PaperRecord>>;
}

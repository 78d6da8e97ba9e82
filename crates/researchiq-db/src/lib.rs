//! ResearchIQ Storage Layer
//!
//! A single JSON file holds every paper ever fetched, as one array in fetch
//! order. Readers load the whole array; writers load, append and rewrite it.
//!
//! # Example
//!
//! ```rust,no_run
//! use researchiq_db::{PaperFilter, PaperStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PaperStore::new("./data/papers.json");
//!     let counts = store.yearly_count().await;
//!     let recent = store.filter(&PaperFilter::by_year("2024")).await;
//!     println!("{} years, {} papers from 2024", counts.len(), recent.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod papers;
pub mod analytics;

pub use error::{DbError, Result};
pub use papers::{PaperStore, StoreSnapshot};
pub use analytics::{filter_papers, yearly_count, PaperFilter};

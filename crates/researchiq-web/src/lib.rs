//! researchiq-web: HTTP service for ResearchIQ.
//!   - Fetch papers from arXiv and persist them
//!   - Per-year counts and year/keyword filtering over stored papers

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

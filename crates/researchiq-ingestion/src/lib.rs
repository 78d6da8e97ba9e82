//! researchiq-ingestion: Paper discovery.
//! - Upstream search clients (arXiv)
//! - Atom feed parsing into normalized `PaperRecord`s

pub mod sources;

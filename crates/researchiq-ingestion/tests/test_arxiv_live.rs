//! Live search against the public arXiv export API.
//!
//! Run with: cargo test --package researchiq-ingestion --test test_arxiv_live -- --ignored --nocapture

use researchiq_common::sandbox::{SandboxClient, DEFAULT_TIMEOUT};
use researchiq_ingestion::sources::arxiv::ArxivClient;
use researchiq_ingestion::sources::LiteratureSource;

#[tokio::test]
#[ignore] // Requires network access
async fn test_arxiv_search_ai() {
    let client = ArxivClient::new(SandboxClient::new(DEFAULT_TIMEOUT).unwrap());

    let papers = client
        .search("ai", 3)
        .await
        .expect("arXiv search failed");

    println!("Found {} papers", papers.len());
    for paper in &papers {
        println!("\n---");
        println!("Title: {}", paper.title);
        println!("Year: {}", paper.published_year);
    }

    assert!(!papers.is_empty(), "Should find at least one paper");
    assert!(papers.len() <= 3);
    assert!(papers.iter().all(|p| p.source == "arxiv"));
}

//! ResearchIQ Web Server
//!
//! Run with: cargo run -p researchiq-web

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use researchiq_common::SandboxClient;
use researchiq_db::PaperStore;
use researchiq_ingestion::sources::arxiv::ArxivClient;
use researchiq_web::{config::Config, router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting ResearchIQ Web Server...");

    let mut http = SandboxClient::new(config.upstream.timeout())?;
    for host in &config.upstream.extra_allowed_hosts {
        http.allow_domain(host);
    }
    let source = ArxivClient::with_endpoint(http, config.upstream.arxiv_url.clone());
    let store = PaperStore::new(&config.storage.papers_path);
    info!(
        endpoint = source.endpoint(),
        store = %store.path().display(),
        timeout_secs = config.upstream.timeout_secs,
        "Configured"
    );

    let app = build_router(AppState::new(store, Arc::new(source)));

    let addr = config.server.bind_addr()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

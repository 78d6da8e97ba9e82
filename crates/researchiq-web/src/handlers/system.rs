//! Service info.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// GET / - Static greeting
pub async fn read_root() -> Json<RootResponse> {
    Json(RootResponse { message: "Welcome to ResearchIQ API" })
}

//! Error payloads returned by the HTTP boundary.
//! Every failure becomes a `{"error": "..."}` body; nothing propagates as a panic.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use researchiq_common::ResearchIqError;
use researchiq_db::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch from {source_name}: {detail}")]
    Fetch { source_name: &'static str, detail: String },

    #[error("Failed to parse {source_name} response: {detail}")]
    Parse { source_name: &'static str, detail: String },

    #[error("Failed to save papers: {0}")]
    Save(#[from] DbError),
}

impl ApiError {
    /// Split an upstream failure into transport vs. body-decoding errors.
    pub fn from_source(source_name: &'static str, err: ResearchIqError) -> Self {
        match err {
            ResearchIqError::Xml(detail) => ApiError::Parse { source_name, detail },
            other => ApiError::Fetch { source_name, detail: other.to_string() },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Fetch { .. } | ApiError::Parse { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Save(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Request failed");
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_errors_become_parse_errors() {
        let err = ApiError::from_source("arXiv", ResearchIqError::Xml("unexpected end".into()));
        assert_eq!(err.to_string(), "Failed to parse arXiv response: unexpected end");
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_transport_errors_become_fetch_errors() {
        let err = ApiError::from_source("arXiv", ResearchIqError::Security("blocked".into()));
        assert!(err.to_string().starts_with("Failed to fetch from arXiv: "));
        assert!(err.to_string().contains("blocked"));
    }

    #[test]
    fn test_save_errors_are_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = ApiError::Save(DbError::Io(io));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Failed to save papers: "));
    }
}

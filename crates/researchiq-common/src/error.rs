use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResearchIqError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status} returned for url: {url}")]
    Upstream { status: reqwest::StatusCode, url: String },

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    Security(String),
}

pub type Result<T> = std::result::Result<T, ResearchIqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_names_status_and_url() {
        let err = ResearchIqError::Upstream {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            url: "http://export.arxiv.org/api/query".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("export.arxiv.org"));
    }
}

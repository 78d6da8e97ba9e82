use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::ResearchIqError;

/// Upper bound applied to every outbound call unless the caller picks another.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An HTTP client capped to an allowlist of hosts, with a client-wide timeout.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client allowing the arXiv export API and loopback hosts.
    pub fn new(timeout: Duration) -> Result<Self, ResearchIqError> {
        let allowlist = [
            "export.arxiv.org", // arXiv
            "localhost",
            "127.0.0.1",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| ResearchIqError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or a subdomain of an allowed host
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Starts a GET request if the URL's host is allowlisted.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, ResearchIqError> {
        if !self.is_allowed(url) {
            return Err(ResearchIqError::Security(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}

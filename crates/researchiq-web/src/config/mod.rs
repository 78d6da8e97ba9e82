//! Configuration loading for ResearchIQ.
//! Reads researchiq.toml from the current directory or the path in the
//! RESEARCHIQ_CONFIG env var. Every field has a default, so the file and any
//! of its sections may be omitted.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "researchiq.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 8000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_papers_path")]
    pub papers_path: String,
}

fn default_papers_path() -> String { "data/papers.json".to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self { papers_path: default_papers_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_arxiv_url")]
    pub arxiv_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub extra_allowed_hosts: Vec<String>,
}

fn default_arxiv_url()    -> String { researchiq_ingestion::sources::arxiv::ARXIV_API_URL.to_string() }
fn default_timeout_secs() -> u64    { 30 }

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            arxiv_url: default_arxiv_url(),
            timeout_secs: default_timeout_secs(),
            extra_allowed_hosts: Vec::new(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}


impl Config {
    /// Load configuration from researchiq.toml, then apply env overrides.
    /// A missing default file falls back to built-in defaults; a missing
    /// file named by RESEARCHIQ_CONFIG is an error.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var("RESEARCHIQ_CONFIG").ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else if explicit.is_some() {
            anyhow::bail!("Config file not found: {}", path);
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// RESEARCHIQ_PORT and RESEARCHIQ_PAPERS_PATH take precedence over the file.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(port) = lookup("RESEARCHIQ_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid RESEARCHIQ_PORT {:?}: {}", port, e))?;
        }
        if let Some(path) = lookup("RESEARCHIQ_PAPERS_PATH") {
            self.storage.papers_path = path;
        }
        Ok(())
    }
}

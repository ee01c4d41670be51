use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub model_id: String,
    pub text_column: String,
    pub header_skip_rows: usize,
    pub download_dir: PathBuf,
    pub exporter_base_url: Option<String>,
    pub exporter_api_key: Option<String>,
    pub exporter_request_timeout_secs: u64,
    pub export_poll_timeout_secs: u64,
    pub export_poll_interval_ms: u64,
}

impl AppConfig {
    /// The exporter base URL, required for URL-driven extraction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming `ICSA_EXPORTER_URL` when
    /// no exporter endpoint is configured.
    pub fn require_exporter_url(&self) -> Result<&str, ConfigError> {
        self.exporter_base_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("ICSA_EXPORTER_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("model_id", &self.model_id)
            .field("text_column", &self.text_column)
            .field("header_skip_rows", &self.header_skip_rows)
            .field("download_dir", &self.download_dir)
            .field("exporter_base_url", &self.exporter_base_url)
            .field(
                "exporter_api_key",
                &self.exporter_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "exporter_request_timeout_secs",
                &self.exporter_request_timeout_secs,
            )
            .field("export_poll_timeout_secs", &self.export_poll_timeout_secs)
            .field("export_poll_interval_ms", &self.export_poll_interval_ms)
            .finish()
    }
}

//! Daemon configuration
//!
//! Loaded from an optional TOML file; command-line flags are applied on top.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use arriba_client::{ClientConfig, DEFAULT_API_URL, DEFAULT_AUTH_URL};
use serde::Deserialize;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serve canned data instead of calling the real portal
    pub use_mock: bool,
    pub log_format: LogFormat,
    /// Deployment name reported by the version endpoint
    pub environment: String,
    pub server: ServerConfig,
    pub vendor: VendorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_mock: false,
            log_format: LogFormat::default(),
            environment: arriba_api::state::DEFAULT_ENVIRONMENT.to_string(),
            server: ServerConfig::default(),
            vendor: VendorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    pub auth_url: String,
    pub api_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl VendorConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            auth_url: self.auth_url.clone(),
            api_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_target_production_portal() {
        let config = Config::default();

        assert!(!config.use_mock);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.vendor.auth_url, "https://sso.arubainstanton.com");
        assert_eq!(
            config.vendor.api_url,
            "https://nb.portal.arubainstanton.com/api"
        );

        let client = config.vendor.client_config();
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(client.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn parses_full_file() {
        let file = write_config(
            r#"
use_mock = true
log_format = "json"
environment = "Development"

[server]
host = "127.0.0.1"
port = 9090

[vendor]
auth_url = "http://localhost:7000"
api_url = "http://localhost:7000/api"
timeout_secs = 5
connect_timeout_secs = 1
"#,
        );

        let config = Config::load_from(file.path()).unwrap();

        assert!(config.use_mock);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.environment, "Development");
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.vendor.auth_url, "http://localhost:7000");
        assert_eq!(config.vendor.timeout_secs, 5);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("[server]\nport = 3000\n");

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.vendor.timeout_secs, 30);
        assert!(!config.use_mock);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("use_mock = \"sometimes\"");
        let err = Config::load_from(file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn no_path_means_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.server.port, 8080);
    }
}

//! Client configuration for the StudyFlow API.
//!
//! Read from `~/.config/studyflow/config.toml`. A missing file yields the
//! defaults; `STUDYFLOW_API_URL` overrides the base URL.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use studyflow_core::{Result, StudyflowError};

/// Base URL used when nothing is configured (the analysis service's dev port).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable overriding `base_url`.
pub const API_URL_ENV: &str = "STUDYFLOW_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Root structure of config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the service, without a trailing `/api`.
    pub base_url: String,
    /// Per-request timeout. Document analysis can take a while.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from the default path and applies the environment override.
    pub fn load() -> Result<Self> {
        let config = Self::load_from_path(&config_path()?)?;
        Ok(config.with_base_url_override(std::env::var(API_URL_ENV).ok()))
    }

    /// Loads the configuration from `path`, returning defaults if the file does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            StudyflowError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            StudyflowError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Replaces `base_url` when `value` is present and not blank.
    pub fn with_base_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// Full URL of an API path such as `/api/chat`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Returns the path to the configuration file: ~/.config/studyflow/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StudyflowError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("studyflow").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ClientConfig::load_from_path(&temp_dir.path().join("config.toml"))
            .expect("Should fall back to defaults");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "base_url = \"https://study.example\"\n").unwrap();

        let config = ClientConfig::load_from_path(&path).expect("Should load config");
        assert_eq!(config.base_url, "https://study.example");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = \"soon\"\n").unwrap();

        let err = ClientConfig::load_from_path(&path).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_env_override() {
        let config = ClientConfig::default()
            .with_base_url_override(Some("http://10.0.0.2:8080".to_string()));
        assert_eq!(config.base_url, "http://10.0.0.2:8080");

        let untouched = ClientConfig::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(untouched.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = ClientConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.endpoint("/api/analyze"), "http://localhost:5000/api/analyze");
        assert_eq!(config.endpoint("api/chat"), "http://localhost:5000/api/chat");
    }
}

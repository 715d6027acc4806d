//! Client configuration.
//!
//! Read from a TOML file, with the API address overridable by the caller
//! (CLI flag or environment).
//!
//! # Example
//!
//! ```toml
//! [api]
//! url = "https://api.openmeal.org"
//! timeout_secs = 10
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Environment variable consulted for the backend address.
pub const API_URL_ENV: &str = "OPENMEAL_API_URL";

/// On-disk layout of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
}

/// `[api]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolved settings for an [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub api_url: String,
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        Ok(ClientConfig {
            api_url: normalize_url(api_url)?,
            timeout: None,
        })
    }

    /// Resolve configuration: `api_url_override` wins, then the file's
    /// `[api] url`, then [`DEFAULT_API_URL`].
    pub fn resolve(
        config_path: Option<&Path>,
        api_url_override: Option<&str>,
    ) -> Result<Self, ClientError> {
        let file = match config_path {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };

        let url = api_url_override
            .or(file.api.url.as_deref())
            .unwrap_or(DEFAULT_API_URL);

        Ok(ClientConfig {
            api_url: normalize_url(url)?,
            timeout: file.api.timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Read and parse a config TOML file from `path`.
pub fn read_config_file(path: &Path) -> Result<ConfigFile, ClientError> {
    let content = std::fs::read_to_string(path).map_err(|e| ClientError::ConfigRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| ClientError::ConfigParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn normalize_url(url: &str) -> Result<String, ClientError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::InvalidUrl(url.to_string()));
    }
    Ok(trimmed.to_string())
}

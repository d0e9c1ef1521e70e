// src/config.rs

//! Endpoint configuration
//!
//! Connection settings for the Nexus instance live in a small TOML file:
//!
//! ```toml
//! [server]
//! url = "http://localhost:8081"
//! username = "admin"
//! password = "admin123"
//! ```
//!
//! The `--config` argument accepts either a path to such a file or a bare
//! URL; a URL yields an inline configuration without credentials.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the endpoint configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/nexctl/config.toml";

/// Connection settings for a Nexus instance
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the Nexus instance, e.g. `http://localhost:8081`
    pub url: String,

    /// Username for HTTP basic auth
    #[serde(default)]
    pub username: Option<String>,

    /// Password for HTTP basic auth
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    server: Config,
}

impl Config {
    /// Inline configuration from a bare URL, no credentials
    pub fn from_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            username: None,
            password: None,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let file: ConfigFile = toml::from_str(&content)?;
        Ok(file.server)
    }

    /// Resolve a `--config` argument: an existing file is parsed as TOML,
    /// anything else is treated as a bare URL
    pub fn from_url_or_file(value: &str) -> Result<Self> {
        let path = Path::new(value);
        if path.exists() {
            Self::from_file(path)
        } else if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::from_url(value))
        } else {
            Err(Error::ConfigError(format!(
                "'{value}' is neither an existing config file nor an http(s) URL"
            )))
        }
    }

    /// Load from the default path, or fall back to an explicit value
    pub fn load(arg: Option<&str>) -> Result<Self> {
        match arg {
            Some(value) => Self::from_url_or_file(value),
            None => Self::from_file(Path::new(DEFAULT_CONFIG_PATH)),
        }
    }
}

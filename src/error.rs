// src/error.rs

//! Error types for nexctl
//!
//! HTTP-level failures (non-2xx responses) are deliberately NOT errors:
//! the providers log the raw response body and keep going, so one broken
//! resource does not abort a reconciliation run. Only connection-level
//! transport failures, malformed JSON and local file problems surface
//! through this type.

use thiserror::Error;

/// Errors that can occur during a reconciliation run
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("Invalid manifest version: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

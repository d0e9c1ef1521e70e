// src/transport.rs

//! HTTP transport for the Nexus REST API
//!
//! Wraps a blocking reqwest client behind a small trait so providers can
//! be driven by a fake in tests. Non-2xx responses are returned as
//! unsuccessful [`ApiResponse`] values rather than errors; only
//! connection-level failures produce an `Err`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Path prefix for the Nexus v1 REST API
const API_PREFIX: &str = "service/rest/v1/";

/// A response from the REST API: status plus raw body text
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Whether the request succeeded (2xx status)
    pub fn success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP collaborator the providers talk through
pub trait Transport {
    fn get(&self, path: &str) -> Result<ApiResponse>;
    fn post(&self, path: &str, body: &Value) -> Result<ApiResponse>;
    fn put(&self, path: &str, body: &Value) -> Result<ApiResponse>;
    fn delete(&self, path: &str) -> Result<ApiResponse>;
}

/// Blocking HTTP client for a Nexus instance
pub struct NexusClient {
    client: Client,
    base: Url,
    username: Option<String>,
    password: Option<String>,
}

impl NexusClient {
    /// Create a client from endpoint configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::TransportError(format!("Failed to create HTTP client: {e}")))?;

        let mut base = Url::parse(&config.url)
            .map_err(|e| Error::ConfigError(format!("Invalid server URL '{}': {e}", config.url)))?;
        // Url::join treats a missing trailing slash as a file component
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        Ok(Self {
            client,
            base,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Resolve an API path like `security/roles` against the base URL
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(API_PREFIX)
            .and_then(|u| u.join(path))
            .map_err(|e| Error::TransportError(format!("Invalid API path '{path}': {e}")))
    }

    fn execute(&self, request: reqwest::blocking::RequestBuilder) -> Result<ApiResponse> {
        let request = match &self.username {
            Some(user) => request.basic_auth(user, self.password.as_deref()),
            None => request,
        };

        let response = request
            .send()
            .map_err(|e| Error::TransportError(format!("Request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::TransportError(format!("Failed to read response body: {e}")))?;

        debug!("API response: status={}", status);
        Ok(ApiResponse { status, body })
    }
}

impl Transport for NexusClient {
    fn get(&self, path: &str) -> Result<ApiResponse> {
        debug!("GET {}", path);
        self.execute(self.client.get(self.endpoint(path)?))
    }

    fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        debug!("POST {}", path);
        self.execute(self.client.post(self.endpoint(path)?).json(body))
    }

    fn put(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        debug!("PUT {}", path);
        self.execute(self.client.put(self.endpoint(path)?).json(body))
    }

    fn delete(&self, path: &str) -> Result<ApiResponse> {
        debug!("DELETE {}", path);
        self.execute(self.client.delete(self.endpoint(path)?))
    }
}

// tests/common/mod.rs

//! Shared test utilities: an in-memory fake transport that records every
//! request and replays canned responses.

use std::cell::RefCell;
use std::collections::HashMap;

use nexctl::{ApiResponse, Result, Transport};
use serde_json::Value;

/// A request the provider issued, as recorded by the fake transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Fake transport with canned responses keyed by (method, path)
///
/// Unstubbed paths answer 404 with an empty body, which doubles as the
/// "detail fetch failed" case in blobstore listing tests.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<HashMap<(&'static str, String), ApiResponse>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &'static str, path: &str, status: u16, body: &str) {
        self.responses.borrow_mut().insert(
            (method, path.to_string()),
            ApiResponse {
                status,
                body: body.to_string(),
            },
        );
    }

    /// All recorded requests matching a method
    pub fn requests_for(&self, method: &'static str) -> Vec<RecordedRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    fn dispatch(&self, method: &'static str, path: &str, body: Option<&Value>) -> ApiResponse {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        self.responses
            .borrow()
            .get(&(method, path.to_string()))
            .cloned()
            .unwrap_or(ApiResponse {
                status: 404,
                body: String::new(),
            })
    }
}

impl Transport for FakeTransport {
    fn get(&self, path: &str) -> Result<ApiResponse> {
        Ok(self.dispatch("GET", path, None))
    }

    fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        Ok(self.dispatch("POST", path, Some(body)))
    }

    fn put(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        Ok(self.dispatch("PUT", path, Some(body)))
    }

    fn delete(&self, path: &str) -> Result<ApiResponse> {
        Ok(self.dispatch("DELETE", path, None))
    }
}

//! Per-call request options.
//!
//! # Responsibilities
//! - Carry caller overrides (method, headers, body, timeout)
//! - Merge them over the defaults every API call starts from:
//!   `POST`, `Content-Type: application/json`, `X-Requested-With: XMLHttpRequest`

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Header identifying the call as an AJAX request.
pub const X_REQUESTED_WITH: &str = "x-requested-with";

/// Header carrying the CSRF token.
pub const X_CSRF_TOKEN: &str = "x-csrf-token";

/// Header carrying the per-call request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Caller-supplied options for one API call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Defaults to `POST`.
    pub method: Option<Method>,
    /// Merged over the default headers; same-name headers replace defaults.
    pub headers: HeaderMap,
    /// JSON body.
    pub body: Option<Value>,
    /// Overrides the configured per-attempt timeout.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize any value as the JSON body.
    pub fn json<T: Serialize>(self, body: &T) -> Result<Self, serde_json::Error> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn resolved_method(&self) -> Method {
        self.method.clone().unwrap_or(Method::POST)
    }

    pub(crate) fn resolved_headers(&self) -> HeaderMap {
        let mut headers = default_headers();
        for (name, value) in self.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    pub(crate) fn encoded_body(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        self.body.as_ref().map(serde_json::to_vec).transpose()
    }
}

/// Headers every API call starts with.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(X_REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));
    headers
}

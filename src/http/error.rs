//! Error taxonomy for API calls.

use thiserror::Error;

use crate::resilience::retries::Retryable;

/// Errors surfaced by [`ApiClient::send`](crate::http::ApiClient::send).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint name is not in the configured endpoint map.
    #[error("Invalid endpoint: {0}")]
    UnknownEndpoint(String),

    /// The attempt's deadline fired before a response arrived.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Connection, DNS or protocol failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected.
    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout)
    }
}

impl From<tokio::time::error::Elapsed> for FetchError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        FetchError::Timeout
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Only timeouts are retried; everything else fails on first occurrence.
impl Retryable for FetchError {
    fn is_retryable(&self) -> bool {
        self.is_timeout()
    }
}

/// Result type for API calls.
pub type FetchResult<T> = Result<T, FetchError>;

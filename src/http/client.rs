//! API client for the clinic backend.
//!
//! # Responsibilities
//! - Resolve backend/frontend base URLs for the detected environment
//! - Build endpoint URLs from the configured endpoint map
//! - Fetch a CSRF token and attach it to each attempt
//! - Enforce the per-attempt timeout and retry timed-out attempts
//!
//! # Call Flow
//! ```text
//! send(endpoint, options)
//!     → api_url(endpoint)              unknown name: UnknownEndpoint, no attempt
//!     → RetryPolicy::run
//!         → csrf_token()               failure: proceed without header
//!         → with_timeout(transport.send)
//!         → status check → JSON decode
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{ClinicConfig, Environment, PageLocation, CSRF_ENDPOINT};
use crate::http::error::{FetchError, FetchResult};
use crate::http::request::{RequestOptions, X_CSRF_TOKEN, X_REQUEST_ID};
use crate::http::transport::{OutgoingRequest, ReqwestTransport, Transport};
use crate::observability::metrics;
use crate::resilience::{with_timeout, RetryPolicy};

/// Query string sent with every token request.
pub const CSRF_QUERY: &str = "form_id=contact_form&expiry=30";

/// Client for the clinic's backend API.
///
/// Cheap to clone; the config and transport are shared.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClinicConfig>,
    environment: Environment,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client that talks HTTP through `reqwest`.
    pub fn new(config: Arc<ClinicConfig>, location: &PageLocation) -> FetchResult<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, location, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(
        config: Arc<ClinicConfig>,
        location: &PageLocation,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let environment = Environment::detect(location);
        let retry = RetryPolicy::from_form(&config.form);
        let timeout = Duration::from_millis(config.form.timeout_ms);

        tracing::debug!(
            hostname = %location.hostname,
            protocol = %location.protocol,
            environment = %environment,
            backend = %environment.select(&config.backend_urls),
            "API client initialized"
        );

        Self {
            config,
            environment,
            transport,
            retry,
            timeout,
        }
    }

    /// Replace the retry policy derived from the form settings.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn backend_url(&self) -> &str {
        self.environment.select(&self.config.backend_urls)
    }

    pub fn frontend_url(&self) -> &str {
        self.environment.select(&self.config.frontend_urls)
    }

    /// Full URL for a named endpoint, or `None` (logged) if the name is unknown.
    pub fn api_url(&self, endpoint: &str) -> Option<String> {
        match self.config.endpoints.get(endpoint) {
            Some(path) => Some(format!("{}{}", self.backend_url(), path)),
            None => {
                tracing::error!(endpoint, "Unknown API endpoint: {}", endpoint);
                None
            }
        }
    }

    /// Call an endpoint and return its JSON body.
    ///
    /// Timed-out attempts are retried up to `form.max_retries` times with a
    /// linear backoff. Any other error is returned on first occurrence.
    pub async fn send(&self, endpoint: &str, options: RequestOptions) -> FetchResult<Value> {
        let url = self
            .api_url(endpoint)
            .ok_or_else(|| FetchError::UnknownEndpoint(endpoint.to_string()))?;
        let request_id = Uuid::new_v4().to_string();

        let span = tracing::debug_span!("api_call", endpoint, request_id = %request_id);

        let result = self
            .retry
            .run(|retry| self.attempt(endpoint, &url, &options, &request_id, retry))
            .instrument(span)
            .await;

        match &result {
            Ok(_) => tracing::debug!(endpoint, "API call succeeded"),
            Err(e) => tracing::warn!(endpoint, error = %e, "API call failed"),
        }
        result
    }

    /// Call an endpoint and deserialize the JSON body into `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> FetchResult<T> {
        let value = self.send(endpoint, options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a fresh CSRF token. Never fails: any problem is logged and
    /// yields `None`.
    pub async fn csrf_token(&self) -> Option<String> {
        let base = self.api_url(CSRF_ENDPOINT)?;
        let request = OutgoingRequest {
            method: Method::GET,
            url: format!("{}?{}", base, CSRF_QUERY),
            headers: HeaderMap::new(),
            body: None,
        };

        let response = match with_timeout(self.timeout, self.transport.send(request)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to get CSRF token");
                return None;
            }
        };

        match serde_json::from_slice::<Value>(&response.body) {
            Ok(data) => data
                .get("token")
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to get CSRF token");
                None
            }
        }
    }

    async fn attempt(
        &self,
        endpoint: &str,
        url: &str,
        options: &RequestOptions,
        request_id: &str,
        retry: u32,
    ) -> FetchResult<Value> {
        metrics::record_attempt(endpoint, retry);

        let mut headers = options.resolved_headers();
        if let Ok(value) = HeaderValue::from_str(request_id) {
            headers.insert(X_REQUEST_ID, value);
        }

        if self.config.security.enable_csrf && endpoint != CSRF_ENDPOINT {
            if let Some(token) = self.csrf_token().await {
                match HeaderValue::from_str(&token) {
                    Ok(value) => {
                        headers.insert(X_CSRF_TOKEN, value);
                    }
                    Err(_) => tracing::warn!("CSRF token is not a valid header value, sending without it"),
                }
            }
        }

        let request = OutgoingRequest {
            method: options.resolved_method(),
            url: url.to_string(),
            headers,
            body: options.encoded_body()?,
        };

        let timeout = options.timeout.unwrap_or(self.timeout);
        tracing::debug!(url, retry, timeout_ms = timeout.as_millis() as u64, "Sending request");

        let response = with_timeout(timeout, self.transport.send(request)).await?;
        if !response.status.is_success() {
            return Err(FetchError::Status(response.status.as_u16()));
        }

        Ok(serde_json::from_slice(&response.body)?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("environment", &self.environment)
            .field("backend_url", &self.backend_url())
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish()
    }
}

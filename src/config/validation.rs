//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every base URL parses as http(s)
//! - Check referential integrity (CSRF enabled implies a `csrf` endpoint)
//! - Validate value ranges (timeout > 0, rate budget > 0)
//!
//! Returns all validation errors, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::{ClinicConfig, UrlSet, CSRF_ENDPOINT};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: String, value: String },

    #[error("endpoint '{0}' has an empty path")]
    EmptyEndpointPath(String),

    #[error("CSRF is enabled but no 'csrf' endpoint is configured")]
    MissingCsrfEndpoint,

    #[error("form.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("security.max_requests_per_minute must be greater than zero when rate limiting is enabled")]
    ZeroRateBudget,

    #[error("observability.log_level '{0}' is not a known level")]
    UnknownLogLevel(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ClinicConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url_set("backend_urls", &config.backend_urls, &mut errors);
    check_url_set("frontend_urls", &config.frontend_urls, &mut errors);

    for (name, path) in &config.endpoints {
        if path.trim().is_empty() {
            errors.push(ValidationError::EmptyEndpointPath(name.clone()));
        }
    }

    if config.security.enable_csrf && !config.endpoints.contains_key(CSRF_ENDPOINT) {
        errors.push(ValidationError::MissingCsrfEndpoint);
    }

    if config.form.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.security.enable_rate_limiting && config.security.max_requests_per_minute == 0 {
        errors.push(ValidationError::ZeroRateBudget);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url_set(section: &str, urls: &UrlSet, errors: &mut Vec<ValidationError>) {
    for (key, value) in [
        ("local", &urls.local),
        ("production", &urls.production),
        ("clinic", &urls.clinic),
    ] {
        let valid = Url::parse(value)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::InvalidUrl {
                field: format!("{}.{}", section, key),
                value: value.clone(),
            });
        }
    }
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the clinic
//! client. All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the endpoint that issues CSRF tokens.
pub const CSRF_ENDPOINT: &str = "csrf";

/// Root configuration for the clinic client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClinicConfig {
    /// Backend base URLs per environment.
    pub backend_urls: UrlSet,

    /// Frontend base URLs per environment.
    pub frontend_urls: UrlSet,

    /// Endpoint name to path, relative to the backend base URL.
    pub endpoints: BTreeMap<String, String>,

    /// Clinic contact details.
    pub clinic_info: ClinicInfo,

    /// Form submission behavior.
    pub form: FormSettings,

    /// Security settings.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            backend_urls: UrlSet {
                local: "http://localhost/chanse-clinic/backend/".to_string(),
                production: "https://your-clinic-server.com/backend/".to_string(),
                clinic: "https://your-clinic-server.com/backend/".to_string(),
            },
            frontend_urls: UrlSet {
                local: "http://localhost/chanse-clinic/".to_string(),
                production: "https://chanseclinic.com/".to_string(),
                clinic: "https://chanseclinic.com/".to_string(),
            },
            endpoints: default_endpoints(),
            clinic_info: ClinicInfo::default(),
            form: FormSettings::default(),
            security: SecurityConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

fn default_endpoints() -> BTreeMap<String, String> {
    [
        ("contact", "routes/contact.php"),
        ("appointment", "routes/appointment.php"),
        ("newsletter", "routes/newsletter.php"),
        ("settings", "routes/settings.php"),
        (CSRF_ENDPOINT, "routes/csrf.php"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect()
}

/// One URL per deployment environment. A config file that names this
/// section must give all three.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct UrlSet {
    /// Used when the page is served from localhost.
    pub local: String,

    /// Used when the page is served over HTTPS from a public host.
    pub production: String,

    /// Fallback for everything else (e.g. plain HTTP on the clinic LAN).
    pub clinic: String,
}

/// Clinic contact information shown alongside forms.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClinicInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
}

impl Default for ClinicInfo {
    fn default() -> Self {
        Self {
            name: "CHANSE PHYSICIAN & CHILDREN'S CLINIC".to_string(),
            phone: "+256 XXX XXX XXX".to_string(),
            email: "info@chanseclinic.com".to_string(),
            address: "Namulanda, Entebbe, Uganda".to_string(),
            website: "https://chanseclinic.com".to_string(),
        }
    }
}

/// Form submission settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FormSettings {
    /// Maximum number of retries after a timed-out attempt.
    pub max_retries: u32,

    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,

    /// Show feedback for successful submissions.
    pub show_success_message: bool,

    /// Show feedback for failed submissions.
    pub show_error_message: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout_ms: 30_000,
            show_success_message: true,
            show_error_message: true,
        }
    }
}

/// Security settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Attach an `X-CSRF-Token` header to API calls.
    pub enable_csrf: bool,

    /// Enable the advisory client-side rate limiter.
    pub enable_rate_limiting: bool,

    /// Rate limiter budget over a sliding one-minute window.
    pub max_requests_per_minute: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_csrf: true,
            enable_rate_limiting: true,
            max_requests_per_minute: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

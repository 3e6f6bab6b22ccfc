//! Deployment environment detection.
//!
//! # Responsibilities
//! - Describe where the page is served from (`PageLocation`)
//! - Classify that location as local, production, or clinic fallback
//! - Pick the matching backend/frontend base URL from a `UrlSet`

use std::fmt;

use url::Url;

use crate::config::schema::UrlSet;

/// Hostname and protocol of the page the client runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Hostname without port, e.g. `localhost` or `chanseclinic.com`.
    pub hostname: String,
    /// Scheme without the trailing colon, e.g. `https`.
    pub protocol: String,
}

impl PageLocation {
    /// Create a location. A trailing `:` on the protocol (`"https:"`) is accepted.
    pub fn new(hostname: impl Into<String>, protocol: impl Into<String>) -> Self {
        let protocol = protocol.into();
        Self {
            hostname: hostname.into(),
            protocol: protocol.trim_end_matches(':').to_ascii_lowercase(),
        }
    }

    /// Derive a location from a full page URL.
    pub fn from_url(url: &Url) -> Self {
        Self::new(url.host_str().unwrap_or_default(), url.scheme())
    }

    pub fn is_localhost(&self) -> bool {
        self.hostname == "localhost" || self.hostname == "127.0.0.1"
    }

    pub fn is_secure(&self) -> bool {
        self.protocol == "https"
    }
}

/// Deployment environment the client is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Local,
    Production,
    /// Anything that is neither local nor served over HTTPS.
    Clinic,
}

impl Environment {
    /// Classify a page location. Rules are checked in order:
    /// localhost first, then HTTPS, then the clinic fallback.
    pub fn detect(location: &PageLocation) -> Self {
        if location.is_localhost() {
            Environment::Local
        } else if location.is_secure() && location.hostname != "localhost" {
            Environment::Production
        } else {
            Environment::Clinic
        }
    }

    /// Select this environment's entry from a URL set.
    pub fn select<'a>(&self, urls: &'a UrlSet) -> &'a str {
        match self {
            Environment::Local => &urls.local,
            Environment::Production => &urls.production,
            Environment::Clinic => &urls.clinic,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Local => "local",
            Environment::Production => "production",
            Environment::Clinic => "clinic",
        };
        f.write_str(name)
    }
}

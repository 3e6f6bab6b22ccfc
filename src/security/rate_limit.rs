//! Advisory client-side rate limiting.
//!
//! A sliding one-minute window over recorded request instants. Nothing in
//! `ApiClient` consults it: callers ask `can_make_request` before sending.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::SecurityConfig;
use crate::observability::metrics;

/// Length of the sliding window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Per-minute request budget.
pub struct RateLimiter {
    /// Instants of permitted requests, oldest first.
    requests: Mutex<VecDeque<Instant>>,
    max_requests: usize,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(max_requests_per_minute: u32) -> Self {
        Self {
            requests: Mutex::new(VecDeque::new()),
            max_requests: max_requests_per_minute as usize,
            enabled: true,
        }
    }

    /// Build from security settings. A disabled limiter permits every call.
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self {
            enabled: config.enable_rate_limiting,
            ..Self::new(config.max_requests_per_minute)
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Prune entries older than one minute, then record and permit the call
    /// if the budget allows. A denied call is not recorded.
    pub fn can_make_request(&self) -> bool {
        if !self.enabled {
            return true;
        }

        let now = Instant::now();
        let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(minute_ago) = now.checked_sub(WINDOW) {
            while requests.front().is_some_and(|t| *t < minute_ago) {
                requests.pop_front();
            }
        }

        if requests.len() < self.max_requests {
            requests.push_back(now);
            true
        } else {
            tracing::warn!(
                max_requests = self.max_requests,
                "Rate limit exceeded, request denied"
            );
            metrics::record_rate_limited();
            false
        }
    }

    /// Budget left in the current window. Entries are only pruned by
    /// `can_make_request`, so this may under-report after a quiet period.
    pub fn remaining_requests(&self) -> usize {
        if !self.enabled {
            return self.max_requests;
        }
        let requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
        self.max_requests.saturating_sub(requests.len())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_requests", &self.max_requests)
            .field("enabled", &self.enabled)
            .field("remaining", &self.remaining_requests())
            .finish()
    }
}

//! Client-side metrics.
//!
//! # Metrics
//! - `clinic_client_attempts_total` (counter): network attempts by endpoint
//! - `clinic_client_retries_total` (counter): attempts that were retries, by endpoint
//! - `clinic_client_rate_limited_total` (counter): calls denied by the rate limiter
//!
//! Updates go to whatever recorder the host application installed; with
//! none installed they are no-ops.

use metrics::counter;

/// Record one network attempt. `retry` is 0 for the first attempt.
pub fn record_attempt(endpoint: &str, retry: u32) {
    counter!("clinic_client_attempts_total", "endpoint" => endpoint.to_string()).increment(1);
    if retry > 0 {
        counter!("clinic_client_retries_total", "endpoint" => endpoint.to_string()).increment(1);
    }
}

/// Record a call denied by the rate limiter.
pub fn record_rate_limited() {
    counter!("clinic_client_rate_limited_total").increment(1);
}

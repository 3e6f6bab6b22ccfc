//! Linear backoff between retries.

use std::time::Duration;

/// Delay to wait before retry number `retry + 1`.
///
/// Grows by one `step` per retry: `step`, `2 * step`, `3 * step`, ...
/// No jitter is applied.
pub fn linear_backoff(retry: u32, step: Duration) -> Duration {
    step.saturating_mul(retry.saturating_add(1))
}

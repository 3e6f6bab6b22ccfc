//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failed attempt is retryable (`Retryable`)
//! - Run an operation up to `max_retries + 1` times with linear backoff
//! - Keep attempts strictly sequential: each finishes before the next starts

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::FormSettings;
use crate::resilience::backoff::linear_backoff;

/// Default backoff step between retries.
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(1000);

/// Errors that know whether another attempt could succeed.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Linear backoff step.
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    pub fn from_form(form: &FormSettings) -> Self {
        Self {
            max_retries: form.max_retries,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }

    /// `retries` is the number of retries already performed.
    pub fn should_retry<E: Retryable>(&self, error: &E, retries: u32) -> bool {
        retries < self.max_retries && error.is_retryable()
    }

    pub fn delay_for(&self, retries: u32) -> Duration {
        linear_backoff(retries, self.backoff_step)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// retry budget is spent. `op` receives the current retry count.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let mut retries = 0;
        loop {
            match op(retries).await {
                Ok(value) => return Ok(value),
                Err(e) if self.should_retry(&e, retries) => {
                    let delay = self.delay_for(retries);
                    tracing::warn!(
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Request failed, retrying... ({}/{})",
                        retries + 1,
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

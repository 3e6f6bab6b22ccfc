//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap a single attempt with a deadline
//! - Cancel the attempt cleanly when the deadline fires (the future is dropped)
//! - Convert the expiry into the caller's error type

use std::future::Future;
use std::time::Duration;

use tokio::time::error::Elapsed;

/// Run `fut` with a deadline. On expiry the future is dropped and
/// `E::from(Elapsed)` is returned.
pub async fn with_timeout<T, E, F>(duration: Duration, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<Elapsed>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(elapsed) => Err(E::from(elapsed)),
    }
}

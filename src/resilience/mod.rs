//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! API call attempt:
//!     → timeouts.rs (per-attempt deadline, cancels the in-flight call)
//!     → On failure: retries.rs (timeouts only, bounded count)
//!     → backoff.rs (linear delay: 1s, 2s, 3s, ...)
//! ```

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{RetryPolicy, Retryable};
pub use timeouts::with_timeout;

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ApiClient, RateLimiter, Messenger produce:
//!     → tracing events (structured fields, request ID span)
//!     → metrics.rs (counters)
//!
//! The binary installs the subscriber via logging.rs.
//! ```

pub mod logging;
pub mod metrics;

//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Form submission (caller-driven):
//!     → input.rs (validate email/phone, sanitize free text)
//!     → rate_limit.rs (advisory per-minute budget)
//!     → ApiClient::send (CSRF header attached there)
//! ```

pub mod input;
pub mod rate_limit;

pub use input::{is_valid_email, is_valid_phone, sanitize_input, sanitize_value};
pub use rate_limit::RateLimiter;

//! Client-side configuration and API helper for the clinic website.

pub mod config;
pub mod http;
pub mod messages;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::{ClinicConfig, Environment, PageLocation};
pub use http::{ApiClient, FetchError, RequestOptions};
pub use messages::{MessageKind, Messenger};
pub use security::RateLimiter;

//! HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! caller
//!     → request.rs (options merged over default method/headers)
//!     → client.rs (URL building, CSRF, retry loop)
//!     → transport.rs (one request on the wire)
//!     → error.rs (timeout / status / transport / decode)
//! ```

pub mod client;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{ApiClient, CSRF_QUERY};
pub use error::{FetchError, FetchResult};
pub use request::{RequestOptions, X_CSRF_TOKEN, X_REQUESTED_WITH, X_REQUEST_ID};
pub use transport::{OutgoingRequest, ReqwestTransport, Transport, TransportResponse};

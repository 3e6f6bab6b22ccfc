//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClinicConfig (validated, immutable)
//!     → shared via Arc with ApiClient and RateLimiter
//!
//! page location (hostname, protocol)
//!     → environment.rs (local / production / clinic)
//!     → base URL selection
//! ```
//!
//! Config is immutable once loaded. All fields have defaults so an empty
//! file is a valid configuration.

pub mod environment;
pub mod loader;
pub mod schema;
pub mod validation;

pub use environment::{Environment, PageLocation};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ClinicConfig, ClinicInfo, FormSettings, SecurityConfig, UrlSet, CSRF_ENDPOINT};

//! Shared kernel for the Soloroom service.
//!
//! Holds the unified error type, the configuration schemas, and the domain
//! types (lease record, room content, session token) every other crate
//! builds on.

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};

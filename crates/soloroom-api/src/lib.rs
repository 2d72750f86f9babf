//! HTTP surface for the Soloroom service.
//!
//! A thin request/response mapping onto the lease manager: admission goes
//! through the rate limiter, state transitions through the manager, and
//! the wire shapes here are the external contract.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;

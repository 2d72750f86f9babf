//! Application state shared across all handlers.

use std::sync::Arc;

use soloroom_core::config::AppConfig;
use soloroom_service::{LeaseManager, RateLimiter};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Lease lifecycle manager.
    pub lease_manager: Arc<LeaseManager>,
    /// Admission rate limiter.
    pub rate_limiter: Arc<RateLimiter>,
}

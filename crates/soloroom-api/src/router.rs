//! Route definitions for the Soloroom HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(room_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Room occupancy endpoints.
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::room::status))
        .route("/enter", post(handlers::room::enter))
        .route("/heartbeat", post(handlers::room::heartbeat))
        .route("/leave", post(handlers::room::leave))
}

/// Admin endpoints (shared-secret guarded).
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/clear", post(handlers::admin::clear))
        .route("/admin/status", get(handlers::admin::status))
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

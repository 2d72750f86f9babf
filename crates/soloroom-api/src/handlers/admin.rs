//! Admin handlers, guarded by the shared secret.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use soloroom_core::error::AppError;

use crate::dto::request::AdminClearRequest;
use crate::dto::response::{Ack, AdminStatusResponse, EffectiveConfig};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the admin secret on read endpoints.
const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// POST /api/admin/clear
pub async fn clear(
    State(state): State<AppState>,
    Json(req): Json<AdminClearRequest>,
) -> Result<Json<Ack>, ApiError> {
    if !state.config.admin.authorizes(&req.secret) {
        return Err(AppError::forbidden("Invalid admin secret").into());
    }

    state.lease_manager.force_clear().await?;
    Ok(Json(Ack::ok()))
}

/// GET /api/admin/status
pub async fn status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminStatusResponse>, ApiError> {
    let presented = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !state.config.admin.authorizes(presented) {
        return Err(AppError::forbidden("Invalid admin secret").into());
    }

    Ok(Json(AdminStatusResponse {
        record: state.lease_manager.snapshot().await,
        config: EffectiveConfig {
            lease: state.config.lease.clone(),
            rate_limit: state.config.rate_limit.clone(),
        },
    }))
}

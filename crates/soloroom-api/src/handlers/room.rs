//! Room occupancy handlers — status, enter, heartbeat, leave.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use soloroom_core::error::AppError;
use soloroom_core::types::{ContentUpdate, clamp_text, validate_drawing};
use soloroom_service::{AcquireOutcome, ActionClass, HeartbeatOutcome, ReleaseOutcome};

use crate::dto::request::{HeartbeatRequest, LeaveRequest};
use crate::dto::response::{Ack, ClientConfig, EnterGranted, Rejection, StatusResponse, Terminated};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let record = state.lease_manager.snapshot().await;
    let occupied_minutes = record.occupied_seconds(Utc::now()).map(|s| s / 60);

    Json(StatusResponse {
        occupied: record.occupied,
        occupied_minutes,
    })
}

/// POST /api/enter
pub async fn enter(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, ApiError> {
    let key = addr.ip().to_string();
    if !state.rate_limiter.check(&key, ActionClass::Entry).await {
        return Err(AppError::rate_limited("Too many entry attempts").into());
    }

    match state.lease_manager.acquire().await? {
        AcquireOutcome::Granted { token, content } => Ok(Json(EnterGranted {
            success: true,
            session_id: token,
            content,
            config: ClientConfig::from_lease(&state.config.lease),
        })
        .into_response()),
        AcquireOutcome::Occupied => {
            Ok(Json(Rejection::new("Room is occupied")).into_response())
        }
    }
}

/// POST /api/heartbeat
pub async fn heartbeat(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<HeartbeatRequest>,
) -> Result<Response, ApiError> {
    let key = addr.ip().to_string();
    if !state.rate_limiter.check(&key, ActionClass::Heartbeat).await {
        return Err(AppError::rate_limited("Too many heartbeat attempts").into());
    }

    match state.lease_manager.heartbeat(req.session_id).await? {
        HeartbeatOutcome::Renewed => Ok(Json(Ack::ok()).into_response()),
        HeartbeatOutcome::NotHolder => Ok(Json(Terminated {
            success: false,
            terminated: true,
        })
        .into_response()),
    }
}

/// POST /api/leave
pub async fn leave(
    State(state): State<AppState>,
    Json(req): Json<LeaveRequest>,
) -> Result<Response, ApiError> {
    let update = match req.content {
        Some(payload) => {
            if let Some(drawing) = payload.drawing.as_deref() {
                validate_drawing(drawing, state.config.lease.max_drawing_bytes)?;
            }
            Some(ContentUpdate {
                text: payload
                    .text
                    .map(|t| clamp_text(t, state.config.lease.max_text_length)),
                drawing: payload.drawing,
            })
        }
        None => None,
    };

    match state.lease_manager.release(req.session_id, update).await? {
        ReleaseOutcome::Released => Ok(Json(Ack::ok()).into_response()),
        ReleaseOutcome::NotHolder => Ok(Json(Rejection::new("not_owner")).into_response()),
    }
}

//! Response DTOs.

use serde::{Deserialize, Serialize};

use soloroom_core::config::lease::LeaseConfig;
use soloroom_core::config::rate_limit::RateLimitConfig;
use soloroom_core::types::{LeaseRecord, RoomContent, SessionToken};

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Whether the room is occupied.
    pub occupied: bool,
    /// Whole minutes the current occupancy has lasted, when occupied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupied_minutes: Option<i64>,
}

/// Successful `POST /api/enter` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterGranted {
    /// Always `true` on this shape.
    pub success: bool,
    /// The freshly minted session token.
    pub session_id: SessionToken,
    /// What the previous holder left, unmodified.
    pub content: RoomContent,
    /// Client-facing protocol parameters.
    pub config: ClientConfig,
}

/// Protocol parameters handed to the client on entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Interval, in milliseconds, at which the client should heartbeat.
    pub heartbeat_interval: u64,
    /// Maximum text length the server will store.
    pub max_text_length: usize,
}

impl ClientConfig {
    /// Build the advertised parameters from the lease configuration.
    pub fn from_lease(config: &LeaseConfig) -> Self {
        Self {
            heartbeat_interval: config.heartbeat_interval_seconds * 1000,
            max_text_length: config.max_text_length,
        }
    }
}

/// Expected-contention failure body (`"Room is occupied"`, `"not_owner"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    /// Always `false` on this shape.
    pub success: bool,
    /// Machine-readable reason.
    pub error: String,
}

impl Rejection {
    /// Build a rejection with the given reason.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Heartbeat failure body — the session is no longer valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminated {
    /// Always `false` on this shape.
    pub success: bool,
    /// Always `true`: the client should stop heartbeating.
    pub terminated: bool,
}

/// Plain success acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    /// Always `true` on this shape.
    pub success: bool,
}

impl Ack {
    /// The canonical `{"success": true}` body.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body of `GET /api/admin/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatusResponse {
    /// The lease record, verbatim.
    pub record: LeaseRecord,
    /// The effective lease and rate-limit configuration.
    pub config: EffectiveConfig,
}

/// Effective server configuration reported to admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    /// Lease timeouts and content bounds.
    pub lease: LeaseConfig,
    /// Admission rate limits.
    pub rate_limit: RateLimitConfig,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string, `"ok"` when serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

//! Request DTOs.

use serde::Deserialize;

use soloroom_core::types::SessionToken;

/// Body of `POST /api/heartbeat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    /// The caller's session token.
    pub session_id: SessionToken,
}

/// Body of `POST /api/leave`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    /// The caller's session token.
    pub session_id: SessionToken,
    /// Optional content to leave for the next holder.
    #[serde(default)]
    pub content: Option<ContentPayload>,
}

/// Partial content payload on leave.
///
/// Absent fields leave the stored field unchanged.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    /// Replacement text, if any.
    #[serde(default)]
    pub text: Option<String>,
    /// Replacement drawing blob, if any.
    #[serde(default)]
    pub drawing: Option<String>,
}

/// Body of `POST /api/admin/clear`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminClearRequest {
    /// The admin shared secret.
    pub secret: String,
}

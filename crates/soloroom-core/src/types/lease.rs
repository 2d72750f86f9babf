//! The lease record — the single durable unit of state in the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::RoomContent;
use super::token::SessionToken;

/// The one globally-unique lease record.
///
/// Occupancy fields are all set or all cleared together: `occupied` is true
/// iff `holder_id`, `occupied_since`, and `last_heartbeat_at` are present.
/// `content` lives outside that coupling — it is the room's contents, not
/// lease metadata, and survives evictions untouched.
///
/// The serialized field names are the shape external consumers (the admin
/// status endpoint, the on-disk document) observe verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeaseRecord {
    /// Whether a holder currently owns the lease.
    pub occupied: bool,
    /// Live session token; set iff `occupied`.
    pub holder_id: Option<SessionToken>,
    /// When the current occupancy began; set iff `occupied`.
    pub occupied_since: Option<DateTime<Utc>>,
    /// Last successful heartbeat (or the acquire itself); set iff `occupied`.
    pub last_heartbeat_at: Option<DateTime<Utc>>,
    /// What the most recent departing holder left behind.
    #[serde(default)]
    pub content: RoomContent,
}

impl LeaseRecord {
    /// Whether the lease is currently unheld.
    pub fn is_vacant(&self) -> bool {
        !self.occupied
    }

    /// Whether `token` is the live holder of an occupied lease.
    pub fn is_held_by(&self, token: SessionToken) -> bool {
        self.occupied && self.holder_id == Some(token)
    }

    /// Transition to occupied under a freshly minted token.
    pub fn occupy(&mut self, token: SessionToken, now: DateTime<Utc>) {
        self.occupied = true;
        self.holder_id = Some(token);
        self.occupied_since = Some(now);
        self.last_heartbeat_at = Some(now);
    }

    /// Transition back to vacant, clearing all occupancy fields.
    ///
    /// Content is deliberately untouched; callers that want it wiped
    /// (admin clear) reset it separately.
    pub fn vacate(&mut self) {
        self.occupied = false;
        self.holder_id = None;
        self.occupied_since = None;
        self.last_heartbeat_at = None;
    }

    /// Seconds since the occupancy began, if occupied.
    pub fn occupied_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.occupied_since
            .map(|since| (now - since).num_seconds().max(0))
    }

    /// Seconds since the last heartbeat, if occupied.
    pub fn heartbeat_age_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_heartbeat_at
            .map(|at| (now - at).num_seconds().max(0))
    }
}

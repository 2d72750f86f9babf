//! Lease lifecycle configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Lease lifecycle configuration.
///
/// The heartbeat interval is advertised to clients on entry; the heartbeat
/// timeout is the server-side eviction threshold and must leave margin over
/// the interval. The occupancy ceiling is a non-extendable limit that
/// applies even to a perfectly heartbeating holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseConfig {
    /// Interval, in seconds, at which clients are asked to heartbeat.
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_seconds: u64,
    /// Maximum silence, in seconds, before a holder is presumed dead.
    #[serde(default = "default_heartbeat_timeout")]
    pub heartbeat_timeout_seconds: u64,
    /// Absolute occupancy ceiling in seconds, independent of liveness.
    #[serde(default = "default_max_occupancy")]
    pub max_occupancy_seconds: u64,
    /// Cadence, in seconds, of the timeout sweep.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Maximum length, in characters, of the room's text content.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    /// Maximum decoded size, in bytes, of the room's drawing blob.
    #[serde(default = "default_max_drawing_bytes")]
    pub max_drawing_bytes: usize,
}

impl Default for LeaseConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_seconds: default_heartbeat_interval(),
            heartbeat_timeout_seconds: default_heartbeat_timeout(),
            max_occupancy_seconds: default_max_occupancy(),
            sweep_interval_seconds: default_sweep_interval(),
            max_text_length: default_max_text_length(),
            max_drawing_bytes: default_max_drawing_bytes(),
        }
    }
}

impl LeaseConfig {
    /// Heartbeat eviction threshold as a [`chrono::Duration`].
    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::seconds(self.heartbeat_timeout_seconds as i64)
    }

    /// Occupancy ceiling as a [`chrono::Duration`].
    pub fn hard_timeout(&self) -> Duration {
        Duration::seconds(self.max_occupancy_seconds as i64)
    }
}

fn default_heartbeat_interval() -> u64 {
    12
}

fn default_heartbeat_timeout() -> u64 {
    30
}

fn default_max_occupancy() -> u64 {
    180
}

fn default_sweep_interval() -> u64 {
    5
}

fn default_max_text_length() -> usize {
    280
}

fn default_max_drawing_bytes() -> usize {
    256 * 1024
}

//! Admission rate-limit configuration.

use serde::{Deserialize, Serialize};

/// Per-client admission rate limits.
///
/// Each client key keeps a sliding window of attempt timestamps per action
/// class; an attempt is rejected once the count inside the window reaches
/// the class limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Sliding window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// Maximum entry attempts per key within the window.
    #[serde(default = "default_entry_limit")]
    pub entry_limit: usize,
    /// Maximum heartbeat attempts per key within the window.
    #[serde(default = "default_heartbeat_limit")]
    pub heartbeat_limit: usize,
    /// Cadence, in seconds, of the cold-key prune pass.
    #[serde(default = "default_prune_interval")]
    pub prune_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window(),
            entry_limit: default_entry_limit(),
            heartbeat_limit: default_heartbeat_limit(),
            prune_interval_seconds: default_prune_interval(),
        }
    }
}

fn default_window() -> u64 {
    60
}

fn default_entry_limit() -> usize {
    5
}

fn default_heartbeat_limit() -> usize {
    10
}

fn default_prune_interval() -> u64 {
    120
}

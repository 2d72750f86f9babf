//! Sliding-window admission rate limiter.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use soloroom_core::config::rate_limit::RateLimitConfig;

/// Action classes with independent limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionClass {
    /// Attempts to enter the room.
    Entry,
    /// Heartbeat pings.
    Heartbeat,
}

impl ActionClass {
    /// Class name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Heartbeat => "heartbeat",
        }
    }
}

/// Per-client sliding-window rate limiter.
///
/// Each (client key, action class) pair keeps the timestamps of admitted
/// attempts inside the window. An attempt is rejected once the fresh count
/// reaches the class limit; rejected attempts are not recorded. Stale
/// timestamps are pruned lazily on every check, and cold keys are dropped
/// by the periodic [`prune`](Self::prune) pass so the map stays bounded.
#[derive(Debug)]
pub struct RateLimiter {
    /// Window length and per-class limits.
    config: RateLimitConfig,
    /// (key, class) → timestamps of admitted attempts.
    windows: Mutex<HashMap<(String, ActionClass), VecDeque<DateTime<Utc>>>>,
}

impl RateLimiter {
    /// Create a limiter over the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Attempt to admit an action for the given client key.
    pub async fn check(&self, key: &str, class: ActionClass) -> bool {
        self.check_at(key, class, Utc::now()).await
    }

    /// Explicit-clock variant of [`check`](Self::check).
    pub async fn check_at(&self, key: &str, class: ActionClass, now: DateTime<Utc>) -> bool {
        let cutoff = now - self.window();
        let limit = self.limit_for(class);

        let mut windows = self.windows.lock().await;
        let attempts = windows.entry((key.to_string(), class)).or_default();

        while attempts.front().is_some_and(|at| *at <= cutoff) {
            attempts.pop_front();
        }

        if attempts.len() >= limit {
            debug!(key, class = class.as_str(), "Rate limit exceeded");
            return false;
        }

        attempts.push_back(now);
        true
    }

    /// Drop keys with no fresh attempts so memory stays bounded.
    pub async fn prune(&self) {
        self.prune_at(Utc::now()).await;
    }

    /// Explicit-clock variant of [`prune`](Self::prune).
    pub async fn prune_at(&self, now: DateTime<Utc>) {
        let cutoff = now - self.window();
        let mut windows = self.windows.lock().await;

        windows.retain(|_, attempts| {
            while attempts.front().is_some_and(|at| *at <= cutoff) {
                attempts.pop_front();
            }
            !attempts.is_empty()
        });
    }

    /// Number of (key, class) windows currently tracked.
    pub async fn tracked_windows(&self) -> usize {
        self.windows.lock().await.len()
    }

    fn window(&self) -> Duration {
        Duration::seconds(self.config.window_seconds as i64)
    }

    fn limit_for(&self, class: ActionClass) -> usize {
        match class {
            ActionClass::Entry => self.config.entry_limit,
            ActionClass::Heartbeat => self.config.heartbeat_limit,
        }
    }
}

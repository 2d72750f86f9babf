//! Lease lifecycle manager — the single serialization point for occupancy.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use soloroom_core::config::lease::LeaseConfig;
use soloroom_core::error::AppError;
use soloroom_core::types::{ContentUpdate, LeaseRecord, RoomContent, SessionToken};
use soloroom_store::LeaseStore;

/// Result of an acquire attempt.
///
/// An occupied room is expected contention, not a fault; store failures are
/// the only error path.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquireOutcome {
    /// The lease was granted. `content` is what the previous holder left,
    /// returned unmodified.
    Granted {
        /// The freshly minted session token.
        token: SessionToken,
        /// The room's current content, untouched by the grant.
        content: RoomContent,
    },
    /// Another session holds the lease.
    Occupied,
}

/// Result of a heartbeat attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatOutcome {
    /// The heartbeat timestamp was renewed.
    Renewed,
    /// The caller is not the live holder — a stale token, a never-issued
    /// token, and a vacant lease all report identically.
    NotHolder,
}

/// Result of a release attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The lease was released.
    Released,
    /// The caller is not the live holder.
    NotHolder,
}

/// Result of a sweep cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Nothing to do — the lease is vacant.
    Vacant,
    /// The holder is within both timeout bounds.
    Alive,
    /// The holder was evicted.
    Expired(ExpiryReason),
}

/// Why a sweep evicted the holder.
///
/// The heartbeat check runs first; when both thresholds would fire in the
/// same sweep, check order decides, not the numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryReason {
    /// Silence exceeded the heartbeat timeout.
    HeartbeatTimeout,
    /// Occupancy exceeded the non-extendable ceiling.
    HardTimeout,
}

impl ExpiryReason {
    /// Wire-level reason string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeartbeatTimeout => "heartbeat_timeout",
            Self::HardTimeout => "hard_timeout",
        }
    }
}

impl std::fmt::Display for ExpiryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the lease lifecycle: acquire, heartbeat renewal, voluntary release,
/// timeout reclamation, and forced admin reclamation.
///
/// Every transition runs inside one mutex-guarded critical section around
/// read–validate–persist: the durable write happens while the lock is held,
/// and the in-memory record is only updated after the write succeeds. A
/// store failure therefore leaves the previous state intact and surfaces as
/// an error distinct from "room occupied" — the manager fails closed rather
/// than risking a double grant.
pub struct LeaseManager {
    /// Durable holder of the record.
    store: Arc<dyn LeaseStore>,
    /// Lease timeouts and content bounds.
    config: LeaseConfig,
    /// The authoritative in-memory record, guarded by the critical section.
    record: Mutex<LeaseRecord>,
}

impl std::fmt::Debug for LeaseManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaseManager")
            .field("config", &self.config)
            .finish()
    }
}

impl LeaseManager {
    /// Open the manager over a store, loading the persisted record.
    ///
    /// A store that has never been written yields the default record
    /// (vacant, empty content), which is persisted immediately so the
    /// document exists from the first boot. An unreadable record is an
    /// error — booting over a corrupt store must not silently reset it.
    pub async fn open(store: Arc<dyn LeaseStore>, config: LeaseConfig) -> Result<Self, AppError> {
        let record = match store.load().await? {
            Some(mut record) => {
                record.content.clamp(config.max_text_length);
                record
            }
            None => {
                let record = LeaseRecord::default();
                store.persist(&record).await?;
                record
            }
        };

        if record.occupied {
            info!(
                session = %record.holder_id.map(|t| t.to_string()).unwrap_or_default(),
                "Loaded an occupied lease, sweep will reclaim it if stale"
            );
        }

        Ok(Self {
            store,
            config,
            record: Mutex::new(record),
        })
    }

    /// The lease configuration this manager enforces.
    pub fn config(&self) -> &LeaseConfig {
        &self.config
    }

    /// A point-in-time copy of the record, for status reporting.
    pub async fn snapshot(&self) -> LeaseRecord {
        self.record.lock().await.clone()
    }

    /// Attempt to acquire the lease.
    pub async fn acquire(&self) -> Result<AcquireOutcome, AppError> {
        self.acquire_at(Utc::now()).await
    }

    /// Explicit-clock variant of [`acquire`](Self::acquire).
    pub async fn acquire_at(&self, now: DateTime<Utc>) -> Result<AcquireOutcome, AppError> {
        let mut record = self.record.lock().await;

        if record.occupied {
            return Ok(AcquireOutcome::Occupied);
        }

        let token = SessionToken::mint();
        let mut next = record.clone();
        next.occupy(token, now);

        self.store.persist(&next).await?;
        *record = next;

        info!(session = %token, "Lease acquired");

        Ok(AcquireOutcome::Granted {
            token,
            content: record.content.clone(),
        })
    }

    /// Renew the holder's heartbeat.
    pub async fn heartbeat(&self, token: SessionToken) -> Result<HeartbeatOutcome, AppError> {
        self.heartbeat_at(token, Utc::now()).await
    }

    /// Explicit-clock variant of [`heartbeat`](Self::heartbeat).
    pub async fn heartbeat_at(
        &self,
        token: SessionToken,
        now: DateTime<Utc>,
    ) -> Result<HeartbeatOutcome, AppError> {
        let mut record = self.record.lock().await;

        if !record.is_held_by(token) {
            return Ok(HeartbeatOutcome::NotHolder);
        }

        let mut next = record.clone();
        next.last_heartbeat_at = Some(now);

        self.store.persist(&next).await?;
        *record = next;

        debug!(session = %token, "Heartbeat renewed");

        Ok(HeartbeatOutcome::Renewed)
    }

    /// Release the lease, optionally leaving content for the next holder.
    ///
    /// The payload merges field-by-field: an absent field leaves the stored
    /// field unchanged. Content is only ever written on this authenticated
    /// path — evictions never touch it.
    pub async fn release(
        &self,
        token: SessionToken,
        update: Option<ContentUpdate>,
    ) -> Result<ReleaseOutcome, AppError> {
        self.release_at(token, update, Utc::now()).await
    }

    /// Explicit-clock variant of [`release`](Self::release).
    pub async fn release_at(
        &self,
        token: SessionToken,
        update: Option<ContentUpdate>,
        now: DateTime<Utc>,
    ) -> Result<ReleaseOutcome, AppError> {
        let mut record = self.record.lock().await;

        if !record.is_held_by(token) {
            return Ok(ReleaseOutcome::NotHolder);
        }

        let occupied_seconds = record.occupied_seconds(now).unwrap_or(0);

        let mut next = record.clone();
        if let Some(update) = update {
            next.content.apply(update, self.config.max_text_length);
        }
        next.vacate();

        self.store.persist(&next).await?;
        *record = next;

        info!(session = %token, occupied_seconds, "Lease released");

        Ok(ReleaseOutcome::Released)
    }

    /// Evaluate the timeout conditions and evict a stale or overstaying
    /// holder. Idempotent no-op when vacant; eviction preserves content.
    pub async fn sweep(&self) -> Result<SweepOutcome, AppError> {
        self.sweep_at(Utc::now()).await
    }

    /// Explicit-clock variant of [`sweep`](Self::sweep).
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<SweepOutcome, AppError> {
        let mut record = self.record.lock().await;

        if record.is_vacant() {
            return Ok(SweepOutcome::Vacant);
        }

        let heartbeat_expired = record
            .last_heartbeat_at
            .is_some_and(|at| now - at > self.config.heartbeat_timeout());
        let hard_expired = record
            .occupied_since
            .is_some_and(|since| now - since > self.config.hard_timeout());

        let reason = if heartbeat_expired {
            ExpiryReason::HeartbeatTimeout
        } else if hard_expired {
            ExpiryReason::HardTimeout
        } else {
            return Ok(SweepOutcome::Alive);
        };

        let session = record.holder_id.map(|t| t.to_string()).unwrap_or_default();
        let occupied_seconds = record.occupied_seconds(now).unwrap_or(0);

        let mut next = record.clone();
        next.vacate();

        self.store.persist(&next).await?;
        *record = next;

        warn!(
            session = %session,
            reason = %reason,
            occupied_seconds,
            "Lease reclaimed by sweep"
        );

        Ok(SweepOutcome::Expired(reason))
    }

    /// Unconditionally reclaim the lease and wipe the content.
    ///
    /// Unlike a timeout eviction, this resets the room to its initial
    /// state: vacant with empty content.
    pub async fn force_clear(&self) -> Result<(), AppError> {
        let mut record = self.record.lock().await;

        let was_held_by = record.holder_id;

        let mut next = record.clone();
        next.vacate();
        next.content = RoomContent::default();

        self.store.persist(&next).await?;
        *record = next;

        match was_held_by {
            Some(session) => info!(session = %session, "Lease force-cleared, content wiped"),
            None => info!("Vacant lease force-cleared, content wiped"),
        }

        Ok(())
    }
}

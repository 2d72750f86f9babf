//! Sweeper — fixed-cadence driver for timeout reclamation and limiter pruning.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{error, info, trace};

use soloroom_core::config::lease::LeaseConfig;
use soloroom_core::config::rate_limit::RateLimitConfig;
use soloroom_service::{LeaseManager, RateLimiter, SweepOutcome};

/// Periodic driver that evaluates the lease timeouts and prunes cold
/// rate-limiter keys.
///
/// Stateless beyond its timers: every cycle goes through the lease
/// manager's own critical section, the same one request handlers use. A
/// failed cycle is logged and retried on the next tick, never fatal.
pub struct Sweeper {
    /// Lease manager whose `sweep` this driver invokes.
    manager: Arc<LeaseManager>,
    /// Rate limiter to prune.
    limiter: Arc<RateLimiter>,
    /// Cadence of the timeout sweep.
    sweep_interval: Duration,
    /// Cadence of the limiter prune pass.
    prune_interval: Duration,
}

impl std::fmt::Debug for Sweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sweeper")
            .field("sweep_interval", &self.sweep_interval)
            .field("prune_interval", &self.prune_interval)
            .finish()
    }
}

impl Sweeper {
    /// Create a sweeper over the shared manager and limiter.
    pub fn new(
        manager: Arc<LeaseManager>,
        limiter: Arc<RateLimiter>,
        lease_config: &LeaseConfig,
        rate_limit_config: &RateLimitConfig,
    ) -> Self {
        Self {
            manager,
            limiter,
            sweep_interval: Duration::from_secs(lease_config.sweep_interval_seconds),
            prune_interval: Duration::from_secs(rate_limit_config.prune_interval_seconds),
        }
    }

    /// Run until the cancel signal flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            sweep_interval_seconds = self.sweep_interval.as_secs(),
            prune_interval_seconds = self.prune_interval.as_secs(),
            "Sweeper started"
        );

        let mut sweep_tick = time::interval(self.sweep_interval);
        let mut prune_tick = time::interval(self.prune_interval);

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("Sweeper received shutdown signal");
                        break;
                    }
                }
                _ = sweep_tick.tick() => {
                    self.sweep_once().await;
                }
                _ = prune_tick.tick() => {
                    self.limiter.prune().await;
                    trace!("Rate limiter pruned");
                }
            }
        }

        info!("Sweeper shut down");
    }

    /// Run one sweep cycle, tolerating store failures.
    pub async fn sweep_once(&self) {
        match self.manager.sweep().await {
            Ok(SweepOutcome::Expired(reason)) => {
                info!(reason = %reason, "Sweep reclaimed the lease");
            }
            Ok(SweepOutcome::Vacant) | Ok(SweepOutcome::Alive) => {
                trace!("Sweep found nothing to reclaim");
            }
            Err(e) => {
                // Retried on the next tick once the store recovers.
                error!(error = %e, "Sweep cycle failed");
            }
        }
    }
}

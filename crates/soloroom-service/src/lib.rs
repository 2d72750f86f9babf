//! Soloroom domain services.
//!
//! The lease manager — the single serialization point for all occupancy
//! transitions — and the sliding-window rate limiter that gates entry and
//! heartbeat attempts.

pub mod lease;
pub mod limiter;

pub use lease::manager::{
    AcquireOutcome, ExpiryReason, HeartbeatOutcome, LeaseManager, ReleaseOutcome, SweepOutcome,
};
pub use limiter::{ActionClass, RateLimiter};

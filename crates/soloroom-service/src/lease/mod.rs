//! Lease lifecycle — acquire, heartbeat, release, sweep, force-clear.

pub mod manager;

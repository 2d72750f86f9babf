//! In-memory lease store for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use soloroom_core::error::AppError;
use soloroom_core::types::LeaseRecord;

use crate::LeaseStore;

/// Non-durable store holding the record in memory.
///
/// Supports simulating a store outage so callers can verify that the lease
/// manager fails closed instead of reporting a vacant or occupied room.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<LeaseRecord>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a record.
    pub fn with_record(record: LeaseRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Toggle a simulated outage: while set, every operation errors.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(AppError::storage("Lease store is unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LeaseStore for MemoryStore {
    async fn load(&self) -> Result<Option<LeaseRecord>, AppError> {
        self.check_available()?;
        Ok(self.record.lock().expect("store lock poisoned").clone())
    }

    async fn persist(&self, record: &LeaseRecord) -> Result<(), AppError> {
        self.check_available()?;
        *self.record.lock().expect("store lock poisoned") = Some(record.clone());
        Ok(())
    }
}

//! Durable storage boundary for the lease record.
//!
//! The store holds exactly one [`LeaseRecord`](soloroom_core::types::LeaseRecord)
//! and promises nothing beyond last-writer-wins on it. Serialization of
//! read-modify-write cycles is the lease manager's job: every transition
//! runs inside its single critical section, so the store never sees
//! interleaved writers.

pub mod file;
pub mod memory;

use async_trait::async_trait;

use soloroom_core::error::AppError;
use soloroom_core::types::LeaseRecord;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Durable holder of the single lease record.
#[async_trait]
pub trait LeaseStore: Send + Sync {
    /// Read the current record, or `None` if nothing was ever persisted.
    ///
    /// A record that exists but cannot be read or parsed is an error, not
    /// `None` — callers must fail closed rather than assume a vacant room.
    async fn load(&self) -> Result<Option<LeaseRecord>, AppError>;

    /// Durably write the record, replacing whatever was there.
    async fn persist(&self, record: &LeaseRecord) -> Result<(), AppError>;
}

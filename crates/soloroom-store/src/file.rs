//! JSON-file-backed lease store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use soloroom_core::error::{AppError, ErrorKind};
use soloroom_core::types::LeaseRecord;

use crate::LeaseStore;

/// Lease store backed by a single JSON document on disk.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a crash mid-write never leaves a torn record behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Path of the JSON document.
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The document path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".tmp");
        PathBuf::from(path)
    }
}

#[async_trait]
impl LeaseStore for JsonFileStore {
    async fn load(&self) -> Result<Option<LeaseRecord>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Lease document missing, starting vacant");
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read lease document '{}': {e}", self.path.display()),
                    e,
                ));
            }
        };

        let record: LeaseRecord = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Lease document '{}' is corrupt: {e}", self.path.display()),
                e,
            )
        })?;

        Ok(Some(record))
    }

    async fn persist(&self, record: &LeaseRecord) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!(
                    "Failed to create store directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let json = serde_json::to_vec_pretty(record)?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, &json).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to write lease document '{}': {e}",
                temp.display()
            ))
        })?;

        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to replace lease document '{}': {e}",
                self.path.display()
            ))
        })?;

        Ok(())
    }
}

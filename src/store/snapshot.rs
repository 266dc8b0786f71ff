//! Snapshot persistence for ladder state
//!
//! This module defines the interface for loading and persisting the full
//! ladder state, with a JSON file implementation and a null implementation
//! for ephemeral use.

use crate::error::{LadderError, Result};
use crate::store::memory::LadderState;
use async_trait::async_trait;
use std::path::PathBuf;

/// Trait for snapshot persistence operations
///
/// A snapshot is the complete serialized ladder state. The store persists
/// one after every committed mutation, so an implementation that fails in
/// `persist` aborts the commit and leaves the live state untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the most recent snapshot, or None if none exists yet
    async fn load(&self) -> Result<Option<LadderState>>;

    /// Persist the given state as the new snapshot
    async fn persist(&self, state: &LadderState) -> Result<()>;
}

/// JSON file snapshot storage
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileSnapshot {
    /// Create a snapshot store writing compact JSON at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    /// Toggle pretty-printed JSON output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshot {
    async fn load(&self) -> Result<Option<LadderState>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(LadderError::storage(format!(
                    "failed to read snapshot {}: {}",
                    self.path.display(),
                    err
                ))
                .into())
            }
        };

        let state: LadderState = serde_json::from_slice(&bytes).map_err(|err| {
            LadderError::storage(format!(
                "failed to decode snapshot {}: {}",
                self.path.display(),
                err
            ))
        })?;
        Ok(Some(state))
    }

    async fn persist(&self, state: &LadderState) -> Result<()> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(state)
        } else {
            serde_json::to_vec(state)
        }
        .map_err(|err| LadderError::storage(format!("failed to encode snapshot: {}", err)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|err| {
                    LadderError::storage(format!(
                        "failed to create snapshot directory {}: {}",
                        parent.display(),
                        err
                    ))
                })?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, &bytes).await.map_err(|err| {
            LadderError::storage(format!(
                "failed to write snapshot {}: {}",
                tmp_path.display(),
                err
            ))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|err| {
            LadderError::storage(format!(
                "failed to move snapshot into place at {}: {}",
                self.path.display(),
                err
            ))
        })?;

        Ok(())
    }
}

/// Snapshot store that keeps nothing
///
/// Used for ephemeral stores in tests, benches, and `--ephemeral` CLI runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSnapshot;

#[async_trait]
impl SnapshotStore for NullSnapshot {
    async fn load(&self) -> Result<Option<LadderState>> {
        Ok(None)
    }

    async fn persist(&self, _state: &LadderState) -> Result<()> {
        Ok(())
    }
}

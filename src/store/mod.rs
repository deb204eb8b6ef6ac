//! Snapshot store contract.
//!
//! The orchestrator depends only on the [`SnapshotStore`] trait;
//! [`restic::ResticStore`] is the adapter for the restic CLI. A fake
//! in-memory store stands in for deterministic tests.

pub mod restic;

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::Result;

/// Opaque snapshot identifier returned by the store. Never inspected
/// beyond existence and equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Wrap a store-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as issued by the store.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How many snapshots the store keeps when pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Most recent snapshots to keep per day.
    pub keep_daily: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self { keep_daily: 7 }
    }
}

/// Versioned, deduplicated snapshot repository.
///
/// All operations are sequential, blocking calls against an external
/// repository; the repository locator and secret are fixed when the
/// adapter is constructed.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Create a new snapshot of `dir`, labeled with `tag`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository is unreachable, the secret is
    /// wrong, or the directory is unreadable.
    async fn backup(&self, dir: &Path, tag: &str) -> Result<()>;

    /// Remove snapshots outside the retention window. Callers treat a
    /// failure here as non-fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository rejects the prune.
    async fn prune(&self, policy: &RetentionPolicy) -> Result<()>;

    /// Identifier of the most recent snapshot, or `None` if the
    /// repository is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be queried.
    async fn latest_snapshot(&self) -> Result<Option<SnapshotId>>;

    /// Overwrite `target` with the contents of snapshot `id`, excluding
    /// any paths matching `excludes`. Destructive: must never run
    /// concurrently with a process writing `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be materialized.
    async fn restore(&self, id: &SnapshotId, target: &Path, excludes: &[String]) -> Result<()>;
}

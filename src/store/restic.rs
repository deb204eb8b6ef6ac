//! Restic adapter for the snapshot store contract.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

use super::{RetentionPolicy, SnapshotId, SnapshotStore};
use crate::{AppError, Result};

/// Snapshot store backed by the `restic` command-line tool.
///
/// The repository locator and secret are fixed at construction. The secret
/// is handed to restic via the `RESTIC_PASSWORD` environment variable so it
/// never appears in the host's process table.
pub struct ResticStore {
    binary: String,
    repo: String,
    secret: String,
}

impl ResticStore {
    /// Build an adapter for the repository at `repo`.
    pub fn new(repo: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            binary: "restic".to_owned(),
            repo: repo.into(),
            secret: secret.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-r")
            .arg(&self.repo)
            .env("RESTIC_PASSWORD", &self.secret)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    async fn run(&self, op: &str, cmd: &mut Command) -> Result<Vec<u8>> {
        let output = cmd
            .output()
            .await
            .map_err(|err| AppError::Store(format!("{op}: failed to invoke restic: {err}")))?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(AppError::Store(format!(
                "{op}: restic exited with {}: {}",
                output.status,
                stderr.trim()
            )))
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotRecord {
    id: String,
}

/// Parse `restic snapshots --json` output into the most recent snapshot ID.
///
/// Restic emits a JSON array ordered oldest-first; an empty array or a
/// literal `null` means the repository holds no snapshots.
///
/// # Errors
///
/// Returns [`AppError::Store`] if the output is not valid snapshot JSON.
pub fn parse_latest(json: &[u8]) -> Result<Option<SnapshotId>> {
    let text = String::from_utf8_lossy(json);
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }

    let records: Vec<SnapshotRecord> = serde_json::from_str(trimmed).map_err(|err| {
        AppError::Store(format!("latest-snapshot: unexpected restic output: {err}"))
    })?;
    Ok(records.last().map(|record| SnapshotId::new(record.id.clone())))
}

#[async_trait]
impl SnapshotStore for ResticStore {
    async fn backup(&self, dir: &Path, tag: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("backup").arg(dir).arg("--tag").arg(tag);
        self.run("backup", &mut cmd).await?;
        info!(dir = %dir.display(), tag, "snapshot created");
        Ok(())
    }

    async fn prune(&self, policy: &RetentionPolicy) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("forget")
            .arg("--keep-daily")
            .arg(policy.keep_daily.to_string())
            .arg("--prune");
        self.run("prune", &mut cmd).await?;
        debug!(keep_daily = policy.keep_daily, "retention prune completed");
        Ok(())
    }

    async fn latest_snapshot(&self) -> Result<Option<SnapshotId>> {
        let mut cmd = self.command();
        cmd.arg("snapshots").arg("--latest").arg("1").arg("--json");
        let stdout = self.run("latest-snapshot", &mut cmd).await?;
        parse_latest(&stdout)
    }

    async fn restore(&self, id: &SnapshotId, target: &Path, excludes: &[String]) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("restore").arg(id.as_str()).arg("--target").arg(target);
        for pattern in excludes {
            cmd.arg("--exclude").arg(pattern);
        }
        self.run("restore", &mut cmd).await?;
        info!(snapshot = %id, target = %target.display(), "snapshot restored");
        Ok(())
    }
}

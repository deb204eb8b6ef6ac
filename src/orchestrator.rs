//! Session orchestration — the decision core.
//!
//! Sequences restore / pre-run backup / launch / post-run backup around
//! one emulator session. Restore-only and run-and-sync sessions are
//! mutually exclusive, which is what keeps a restore from ever
//! overwriting the save-data directory while the guarded process is
//! running.

use std::path::Path;

use chrono::Local;
use tracing::{info, warn};

use crate::audit::AuditLog;
use crate::config::{SessionConfig, SessionMode};
use crate::launcher::ProcessRunner;
use crate::liveness::LivenessProbe;
use crate::store::SnapshotStore;
use crate::{AppError, Result};

/// Subdirectory of the save-data directory holding live lock metadata.
/// A restore must never overwrite it.
const LOCK_DIR: &str = ".locks";

/// What one session did. Drives the final audit line and the process
/// exit status; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOutcome {
    /// Save data was overwritten from the latest snapshot.
    pub restored: bool,
    /// The pre-run backup was skipped because the emulator was already
    /// running.
    pub pre_sync_skipped: bool,
    /// Exit code of the guarded process, when it was launched.
    pub launch_exit_code: Option<i32>,
    /// The post-run backup completed.
    pub post_sync_performed: bool,
}

/// Drives one session: decides whether to restore, whether to back up,
/// when to launch, and whether to sync afterwards. Collaborators are
/// injected so the decision logic is deterministic under test.
pub struct SessionOrchestrator<'a, S, L, R> {
    config: &'a SessionConfig,
    store: &'a S,
    liveness: &'a L,
    runner: &'a R,
    audit: &'a dyn AuditLog,
}

impl<'a, S, L, R> SessionOrchestrator<'a, S, L, R>
where
    S: SnapshotStore,
    L: LivenessProbe,
    R: ProcessRunner,
{
    /// Wire an orchestrator to its collaborators.
    pub fn new(
        config: &'a SessionConfig,
        store: &'a S,
        liveness: &'a L,
        runner: &'a R,
        audit: &'a dyn AuditLog,
    ) -> Self {
        Self {
            config,
            store,
            liveness,
            runner,
            audit,
        }
    }

    /// Run the session to completion.
    ///
    /// # Errors
    ///
    /// Returns the first fatal failure: no snapshot to restore, a failed
    /// restore, a failed pre-run backup, or a failed launch. A post-run
    /// backup failure is reported through the audit log but is not fatal.
    pub async fn run(&self) -> Result<SessionOutcome> {
        let outcome = match self.config.mode {
            SessionMode::RestoreOnly => self.restore_session().await,
            SessionMode::RunAndSync => self.sync_session().await,
        };

        match outcome {
            Ok(done) => {
                self.audit.record("Session finished.")?;
                Ok(done)
            }
            Err(err) => {
                // The failure itself is the message of record; an audit
                // write failure at this point must not mask it.
                let _ = self.audit.record(&format!("Session failed: {err}"));
                Err(err)
            }
        }
    }

    /// Restore-only path: overwrite local save data with the latest
    /// snapshot, then end the session without launching anything.
    async fn restore_session(&self) -> Result<SessionOutcome> {
        self.audit
            .record("Restoring save data from latest snapshot...")?;

        let latest = match self.store.latest_snapshot().await {
            Ok(latest) => latest,
            Err(err) => {
                self.audit.record(&format!("Error querying snapshots: {err}"))?;
                return Err(err);
            }
        };
        let Some(id) = latest else {
            self.audit.record("No snapshots found in the repository.")?;
            return Err(AppError::NoSnapshot(
                "repository holds no snapshots to restore".to_owned(),
            ));
        };

        let excludes = vec![lock_exclude(&self.config.save_data_dir)];
        if let Err(err) = self
            .store
            .restore(&id, &self.config.save_data_dir, &excludes)
            .await
        {
            self.audit.record(&format!("Error restoring save data: {err}"))?;
            return Err(err);
        }

        self.audit
            .record(&format!("Save data restored successfully from snapshot {id}."))?;
        Ok(SessionOutcome {
            restored: true,
            ..SessionOutcome::default()
        })
    }

    /// Run-and-sync path: pre-run backup (unless the emulator is already
    /// running), launch, post-run backup.
    async fn sync_session(&self) -> Result<SessionOutcome> {
        let mut outcome = SessionOutcome::default();

        if self.liveness.is_running(&self.config.process_name).await {
            // Backing up while the emulator is active elsewhere risks
            // capturing inconsistent save state.
            self.audit.record(&format!(
                "{} is currently running. Skipping pre-run sync.",
                self.config.process_name
            ))?;
            outcome.pre_sync_skipped = true;
        } else if let Err(err) = self.sync_save_data().await {
            // Without a last-known-good backup, launching risks losing
            // unrecoverable progress.
            self.audit.record(&format!("Error backing up save data: {err}"))?;
            return Err(err);
        }

        let code = match self.runner.run_to_exit(&self.config.process_name).await {
            Ok(code) => code,
            Err(err) => {
                self.audit.record(&format!(
                    "Failed to launch {}: {err}",
                    self.config.process_name
                ))?;
                return Err(err);
            }
        };
        self.audit.record(&format!(
            "{} exited with code {code}.",
            self.config.process_name
        ))?;
        outcome.launch_exit_code = Some(code);

        // The guarded process has exited, so no concurrent writer exists;
        // no liveness check is needed before the post-run backup. Its
        // failure does not override the emulator's own result.
        match self.sync_save_data().await {
            Ok(()) => outcome.post_sync_performed = true,
            Err(err) => {
                warn!(%err, "post-run backup failed");
                self.audit
                    .record(&format!("Warning: post-run backup failed: {err}"))?;
            }
        }

        Ok(outcome)
    }

    /// Back up the save-data directory, then prune old snapshots.
    /// Prune is fire-and-forget: its failure never gates the backup
    /// result or any later backup in the session.
    async fn sync_save_data(&self) -> Result<()> {
        self.audit.record("Syncing save data to repository...")?;

        let tag = snapshot_tag();
        self.store.backup(&self.config.save_data_dir, &tag).await?;
        self.audit.record(&format!(
            "Save data backed up successfully (snapshot tag: {tag})."
        ))?;
        info!(tag, dir = %self.config.save_data_dir.display(), "save data synced");

        if let Err(err) = self.store.prune(&self.config.retention).await {
            warn!(%err, "snapshot prune failed");
            self.audit
                .record(&format!("Warning: snapshot prune failed: {err}"))?;
        }
        Ok(())
    }
}

/// Exclude pattern protecting the lock subdirectory during a restore.
/// Active lock metadata must survive a restore that runs alongside a
/// possibly-resuming emulator.
#[must_use]
pub fn lock_exclude(save_data_dir: &Path) -> String {
    format!("{}/{LOCK_DIR}/*", save_data_dir.display())
}

/// Human-discoverable snapshot label: `YYYYMMDD_HHMMSS`, local time.
/// A label, not a uniqueness guarantee — snapshot identity belongs to
/// the store.
#[must_use]
pub fn snapshot_tag() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

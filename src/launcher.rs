//! Guarded process launch.
//!
//! Runs the emulator to completion as an opaque external process. The
//! launch is the only long-running operation in a session: the caller
//! blocks until the process exits, with no timeout — cancellation is the
//! user quitting the emulator itself.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::{AppError, Result};

/// Runs an external program to completion and reports its exit code.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Launch `program` with no arguments and wait for it to exit.
    ///
    /// Returns the process exit code, or `-1` when it was killed by a
    /// signal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Launch`] if the program cannot be started
    /// (not found, permission denied) or waited on.
    async fn run_to_exit(&self, program: &str) -> Result<i32>;
}

/// Launches the guarded process on the host with inherited stdio.
pub struct HostLauncher;

#[async_trait]
impl ProcessRunner for HostLauncher {
    async fn run_to_exit(&self, program: &str) -> Result<i32> {
        let mut child = Command::new(program)
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| AppError::Launch(format!("failed to launch {program}: {err}")))?;

        info!(program, pid = child.id().unwrap_or(0), "guarded process started");

        let status = child
            .wait()
            .await
            .map_err(|err| AppError::Launch(format!("failed waiting for {program}: {err}")))?;

        Ok(status.code().unwrap_or(-1))
    }
}

//! Host process liveness checking.
//!
//! Answers whether a named process is currently running, via `pgrep -x`
//! (exact comm match, no substring matching). Enumeration failure is
//! indeterminate and is treated as "not running": the probe logs a warning
//! and returns `false`, so a broken process table never blocks the user
//! from launching the emulator. Call sites rely on this policy.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

/// The kernel truncates comm names to 15 bytes; `pgrep -x` matches against
/// the truncated form.
const COMM_MAX: usize = 15;

/// Answers whether a process with the given name is currently running.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// `true` if any host process's name exactly matches `process_name`.
    async fn is_running(&self, process_name: &str) -> bool;
}

/// Probe backed by the host's `pgrep` utility.
pub struct PgrepProbe;

/// Reduce a process name (or full path) to the comm name `pgrep -x`
/// matches against: the final path component, truncated to 15 characters.
#[must_use]
pub fn comm_name(process_name: &str) -> &str {
    let base = process_name
        .rsplit('/')
        .next()
        .unwrap_or(process_name);
    match base.char_indices().nth(COMM_MAX) {
        Some((idx, _)) => &base[..idx],
        None => base,
    }
}

#[async_trait]
impl LivenessProbe for PgrepProbe {
    async fn is_running(&self, process_name: &str) -> bool {
        let name = comm_name(process_name);
        match Command::new("pgrep").args(["-x", name]).output().await {
            Ok(output) => output.status.success(),
            Err(err) => {
                warn!(%err, process = process_name, "process enumeration failed; assuming not running");
                false
            }
        }
    }
}

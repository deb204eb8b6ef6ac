//! Session configuration parsing, validation, and platform defaults.

use std::fmt;
use std::path::PathBuf;

use crate::store::RetentionPolicy;
use crate::{AppError, Result};

/// Canonical emulator executable name, used for liveness checks and launch.
pub const DEFAULT_PROCESS_NAME: &str = "pcsx2";

/// How this session reconciles local save data against the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Back up before launch (unless the emulator is already running),
    /// launch the emulator, back up again after it exits.
    RunAndSync,
    /// Overwrite local save data with the latest snapshot; never launch.
    RestoreOnly,
}

/// Immutable session configuration, built once at startup.
#[derive(Clone)]
pub struct SessionConfig {
    /// Restic repository locator.
    pub repo: String,
    /// Repository passphrase. Never logged; the store adapter hands it to
    /// restic through the environment.
    pub secret: String,
    /// Save-data directory under sync.
    pub save_data_dir: PathBuf,
    /// Whether this is a run-and-sync or a restore-only session.
    pub mode: SessionMode,
    /// Name (or path) of the emulator executable.
    pub process_name: String,
    /// Append-only audit log location.
    pub audit_log_path: PathBuf,
    /// Snapshot retention applied after each backup.
    pub retention: RetentionPolicy,
}

impl SessionConfig {
    /// Assemble and validate a session configuration. `None` for the
    /// directory or log path selects the platform default.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if a required field is empty or a
    /// platform default location cannot be determined.
    pub fn new(
        repo: String,
        secret: String,
        save_data_dir: Option<PathBuf>,
        mode: SessionMode,
        process_name: String,
        audit_log_path: Option<PathBuf>,
        retention: RetentionPolicy,
    ) -> Result<Self> {
        if repo.trim().is_empty() {
            return Err(AppError::Config(
                "repository locator must not be empty".to_owned(),
            ));
        }
        if secret.trim().is_empty() {
            return Err(AppError::Config(
                "repository password must not be empty".to_owned(),
            ));
        }
        if process_name.trim().is_empty() {
            return Err(AppError::Config(
                "process name must not be empty".to_owned(),
            ));
        }

        let save_data_dir = match save_data_dir {
            Some(dir) => dir,
            None => default_save_data_dir().ok_or_else(|| {
                AppError::Config(
                    "cannot determine the default save-data directory; pass --memcard-dir"
                        .to_owned(),
                )
            })?,
        };
        let audit_log_path = match audit_log_path {
            Some(path) => path,
            None => default_audit_log_path().ok_or_else(|| {
                AppError::Config(
                    "cannot determine the default log location; pass --log-file".to_owned(),
                )
            })?,
        };

        Ok(Self {
            repo,
            secret,
            save_data_dir,
            mode,
            process_name,
            audit_log_path,
            retention,
        })
    }
}

// Manual Debug so the secret can never leak through diagnostics.
impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("repo", &self.repo)
            .field("secret", &"<redacted>")
            .field("save_data_dir", &self.save_data_dir)
            .field("mode", &self.mode)
            .field("process_name", &self.process_name)
            .field("audit_log_path", &self.audit_log_path)
            .field("retention", &self.retention)
            .finish()
    }
}

/// Platform-standard PCSX2 memory-card directory, when determinable.
#[must_use]
pub fn default_save_data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("PCSX2").join("memcards"))
}

/// Well-known audit log location in the user's home directory.
#[must_use]
pub fn default_audit_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|dir| dir.join("pcsx2_sync.log"))
}

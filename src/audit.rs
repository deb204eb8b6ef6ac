//! Append-only audit trail of session decisions and outcomes.
//!
//! Provides the [`AuditLog`] trait and its file-backed implementation,
//! [`FileAuditLog`], which appends one timestamped line per event and
//! echoes the same line to the invoking terminal.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;

use crate::{AppError, Result};

/// Records one human-readable line per session decision or outcome.
///
/// Implementations must be [`Send`] and [`Sync`] so a single handle can be
/// shared across the session's collaborators.
pub trait AuditLog: Send + Sync {
    /// Append a single audit message.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write operation fails.
    fn record(&self, message: &str) -> Result<()>;
}

/// File-backed audit log.
///
/// The file is opened once (created if missing, always appended to) and
/// each line is written as `YYYY-MM-DD HH:MM:SS: <message>` in local time,
/// flushed immediately, and mirrored to stdout so an interactive user sees
/// the same narrative as the log file.
pub struct FileAuditLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileAuditLog {
    /// Open (or create) the audit log at `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Audit`] if the directory or file cannot be
    /// created or opened.
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    AppError::Audit(format!(
                        "failed to create log directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                AppError::Audit(format!("failed to open audit log {}: {err}", path.display()))
            })?;
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Location of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditLog for FileAuditLog {
    fn record(&self, message: &str) -> Result<()> {
        let line = format!("{}: {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!("{line}");

        let mut guard = self
            .writer
            .lock()
            .map_err(|_| AppError::Audit("audit writer mutex poisoned".to_owned()))?;
        writeln!(guard, "{line}")
            .map_err(|err| AppError::Audit(format!("audit write failed: {err}")))?;
        guard
            .flush()
            .map_err(|err| AppError::Audit(format!("audit flush failed: {err}")))
    }
}

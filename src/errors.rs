//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Snapshot repository failure (unreachable, auth, unreadable directory).
    Store(String),
    /// A restore was requested but the repository holds no snapshots.
    NoSnapshot(String),
    /// The guarded process could not be launched or awaited.
    Launch(String),
    /// Audit log open or write failure.
    Audit(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Store(msg) => write!(f, "store: {msg}"),
            Self::NoSnapshot(msg) => write!(f, "no snapshot: {msg}"),
            Self::Launch(msg) => write!(f, "launch: {msg}"),
            Self::Audit(msg) => write!(f, "audit: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

#![forbid(unsafe_code)]

//! Save-state synchronization guard for emulator sessions.
//!
//! Reconciles a local save-data directory against a versioned remote
//! snapshot repository around the launch of an emulator process, and
//! suppresses the pre-run backup when the emulator is already active.

pub mod audit;
pub mod config;
pub mod errors;
pub mod launcher;
pub mod liveness;
pub mod orchestrator;
pub mod store;

pub use config::SessionConfig;
pub use errors::{AppError, Result};

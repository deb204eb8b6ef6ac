//! Unit tests for session configuration validation and defaults.

use std::path::PathBuf;

use memcard_guard::config::{
    default_save_data_dir, SessionConfig, SessionMode, DEFAULT_PROCESS_NAME,
};
use memcard_guard::store::RetentionPolicy;
use memcard_guard::AppError;

fn valid(mode: SessionMode) -> SessionConfig {
    SessionConfig::new(
        "/backups/memcards".to_owned(),
        "hunter2".to_owned(),
        Some(PathBuf::from("/saves/memcards")),
        mode,
        DEFAULT_PROCESS_NAME.to_owned(),
        Some(PathBuf::from("/tmp/pcsx2_sync.log")),
        RetentionPolicy::default(),
    )
    .expect("valid config")
}

#[test]
fn empty_repo_is_rejected() {
    let err = SessionConfig::new(
        "  ".to_owned(),
        "hunter2".to_owned(),
        Some(PathBuf::from("/saves")),
        SessionMode::RunAndSync,
        "pcsx2".to_owned(),
        Some(PathBuf::from("/tmp/log")),
        RetentionPolicy::default(),
    )
    .expect_err("empty repo must be rejected");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn empty_secret_is_rejected() {
    let err = SessionConfig::new(
        "/backups".to_owned(),
        String::new(),
        Some(PathBuf::from("/saves")),
        SessionMode::RunAndSync,
        "pcsx2".to_owned(),
        Some(PathBuf::from("/tmp/log")),
        RetentionPolicy::default(),
    )
    .expect_err("empty secret must be rejected");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn empty_process_name_is_rejected() {
    let err = SessionConfig::new(
        "/backups".to_owned(),
        "hunter2".to_owned(),
        Some(PathBuf::from("/saves")),
        SessionMode::RunAndSync,
        String::new(),
        Some(PathBuf::from("/tmp/log")),
        RetentionPolicy::default(),
    )
    .expect_err("empty process name must be rejected");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn debug_output_redacts_the_secret() {
    let config = valid(SessionMode::RunAndSync);
    let rendered = format!("{config:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn default_retention_keeps_seven_daily_snapshots() {
    assert_eq!(RetentionPolicy::default().keep_daily, 7);
}

#[test]
fn default_process_name_is_the_emulator() {
    assert_eq!(DEFAULT_PROCESS_NAME, "pcsx2");
}

#[test]
fn default_save_dir_points_at_pcsx2_memcards() {
    // The platform config dir may be absent in minimal environments.
    if let Some(dir) = default_save_data_dir() {
        assert!(dir.ends_with("PCSX2/memcards"));
    }
}

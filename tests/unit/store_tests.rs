//! Unit tests for snapshot store types and restic output parsing.

use memcard_guard::store::restic::parse_latest;
use memcard_guard::store::{RetentionPolicy, SnapshotId};
use memcard_guard::AppError;

#[test]
fn empty_array_means_no_snapshots() {
    assert_eq!(parse_latest(b"[]").expect("parse"), None);
}

#[test]
fn null_output_means_no_snapshots() {
    assert_eq!(parse_latest(b"null\n").expect("parse"), None);
    assert_eq!(parse_latest(b"   ").expect("parse"), None);
}

#[test]
fn last_record_wins() {
    let json = br#"[
        {"time": "2026-08-27T20:11:02Z", "id": "aaa111", "tags": ["20260827_201102"]},
        {"time": "2026-08-28T09:30:45Z", "id": "bbb222", "tags": ["20260828_093045"]}
    ]"#;
    let latest = parse_latest(json).expect("parse");
    assert_eq!(latest, Some(SnapshotId::new("bbb222")));
}

#[test]
fn garbage_output_is_a_store_error() {
    let err = parse_latest(b"not json at all").expect_err("must fail");
    assert!(matches!(err, AppError::Store(_)));
}

#[test]
fn snapshot_id_displays_verbatim() {
    let id = SnapshotId::new("deadbeef");
    assert_eq!(id.to_string(), "deadbeef");
    assert_eq!(id.as_str(), "deadbeef");
}

#[test]
fn retention_default_is_seven_daily() {
    assert_eq!(RetentionPolicy::default(), RetentionPolicy { keep_daily: 7 });
}

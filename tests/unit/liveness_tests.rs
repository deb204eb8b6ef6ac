//! Unit tests for process-name normalization used by the liveness probe.

use memcard_guard::liveness::comm_name;

#[test]
fn short_names_pass_through() {
    assert_eq!(comm_name("pcsx2"), "pcsx2");
}

#[test]
fn full_paths_reduce_to_the_final_component() {
    assert_eq!(comm_name("/usr/bin/pcsx2"), "pcsx2");
}

#[test]
fn long_names_truncate_to_comm_length() {
    // The kernel exposes only the first 15 bytes of a process name.
    assert_eq!(comm_name("pcsx2-qt-nightly-build"), "pcsx2-qt-nightl");
    assert_eq!(comm_name("pcsx2-qt-nightl"), "pcsx2-qt-nightl");
}

#[test]
fn path_and_truncation_compose() {
    assert_eq!(
        comm_name("/opt/emulators/pcsx2-qt-nightly-build"),
        "pcsx2-qt-nightl"
    );
}

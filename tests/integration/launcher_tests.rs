//! Integration tests exercising the real host launcher and liveness probe.

use memcard_guard::launcher::{HostLauncher, ProcessRunner};
use memcard_guard::liveness::{LivenessProbe, PgrepProbe};
use memcard_guard::AppError;

#[tokio::test]
async fn runs_a_trivial_binary_to_exit_zero() {
    let code = HostLauncher
        .run_to_exit("true")
        .await
        .expect("`true` must launch");
    assert_eq!(code, 0);
}

#[tokio::test]
async fn captures_nonzero_exit_codes() {
    let code = HostLauncher
        .run_to_exit("false")
        .await
        .expect("`false` must launch");
    assert_eq!(code, 1);
}

#[tokio::test]
async fn missing_binary_is_a_launch_error() {
    let err = HostLauncher
        .run_to_exit("/definitely/not/a/real/binary")
        .await
        .expect_err("must fail to launch");
    assert!(matches!(err, AppError::Launch(_)));
}

#[tokio::test]
async fn improbable_process_name_is_not_running() {
    let running = PgrepProbe
        .is_running("memguard-no-such-process")
        .await;
    assert!(!running);
}

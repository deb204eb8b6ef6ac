//! Unit tests for error display formatting.

use memcard_guard::AppError;

#[test]
fn display_prefixes_identify_the_failure_domain() {
    let cases = [
        (AppError::Config("bad flag".to_owned()), "config: bad flag"),
        (
            AppError::Store("repository unreachable".to_owned()),
            "store: repository unreachable",
        ),
        (
            AppError::NoSnapshot("repository empty".to_owned()),
            "no snapshot: repository empty",
        ),
        (
            AppError::Launch("binary missing".to_owned()),
            "launch: binary missing",
        ),
        (
            AppError::Audit("disk full".to_owned()),
            "audit: disk full",
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_err: &E) {}
    assert_error(&AppError::Store("x".to_owned()));
}

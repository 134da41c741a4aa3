use std::error::Error;

use cloudlink::errors::{HandlerError, StorageError};

#[test]
fn test_errors_implement_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    assert_error(&HandlerError::MethodNotAllowed);
    assert_error(&StorageError::Presign("test error".to_string()));
}

#[test]
fn test_status_codes_follow_taxonomy() {
    assert_eq!(HandlerError::Config("x".into()).status_code(), 500);
    assert_eq!(HandlerError::BadRequest("x".into()).status_code(), 400);
    assert_eq!(HandlerError::Unauthorized("x".into()).status_code(), 401);
    assert_eq!(HandlerError::MethodNotAllowed.status_code(), 405);
    assert_eq!(
        HandlerError::backend("boom", StorageError::Presign("x".into())).status_code(),
        500
    );
}

#[test]
fn test_backend_message_is_the_context() {
    let error = HandlerError::backend(
        "failed to generate presigned get",
        StorageError::Presign("no credentials".to_string()),
    );

    assert_eq!(error.message(), "failed to generate presigned get");
    assert_eq!(
        format!("{error}"),
        "failed to generate presigned get: Failed to presign S3 request: no credentials"
    );
    assert!(error.source().is_some());
}

#[test]
fn test_diagnostic_lines_are_truncated_from_the_end() {
    let cause = anyhow::anyhow!("root cause")
        .context("layer one")
        .context("layer two")
        .context("layer three");
    let error = HandlerError::backend("Internal server error", cause);

    let all = error.diagnostic_lines(usize::MAX);
    assert!(all.len() > 2);

    let last_two = error.diagnostic_lines(2);
    assert_eq!(last_two.len(), 2);
    assert_eq!(last_two.as_slice(), &all[all.len() - 2..]);
}

#[test]
fn test_diagnostic_lines_empty_for_client_errors() {
    assert!(HandlerError::BadRequest("x".into()).diagnostic_lines(10).is_empty());
}

#[test]
fn test_storage_error_display() {
    let error = StorageError::PresignConfig("too long".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to build presigning config: too long"
    );
}

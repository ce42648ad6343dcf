use vitalcall_core::{CollaboratorError, FailureKind};

#[test]
fn only_transient_kinds_are_retryable() {
    assert!(FailureKind::RateLimited.is_retryable());
    assert!(FailureKind::ServiceUnavailable.is_retryable());
    assert!(FailureKind::Timeout.is_retryable());

    assert!(!FailureKind::AuthenticationFailed.is_retryable());
    assert!(!FailureKind::InvalidRequest.is_retryable());
    assert!(!FailureKind::InvalidOutput.is_retryable());
    assert!(!FailureKind::Unconfigured.is_retryable());
}

#[test]
fn error_message_carries_kind_and_detail() {
    let err = CollaboratorError::new(FailureKind::RateLimited, "slow down");
    assert_eq!(err.to_string(), "rate_limited: slow down");
    assert!(err.is_retryable());
}

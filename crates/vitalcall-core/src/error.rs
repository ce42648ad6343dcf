use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a collaborator call failed.
///
/// Only the transient kinds are worth retrying; see [`FailureKind::is_retryable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    RateLimited,
    ServiceUnavailable,
    Timeout,
    AuthenticationFailed,
    InvalidRequest,
    /// The collaborator answered, but the answer failed validation.
    InvalidOutput,
    /// Credentials or endpoints for the collaborator are missing.
    Unconfigured,
}

impl FailureKind {
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            FailureKind::RateLimited | FailureKind::ServiceUnavailable | FailureKind::Timeout
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::RateLimited => "rate_limited",
            FailureKind::ServiceUnavailable => "service_unavailable",
            FailureKind::Timeout => "timeout",
            FailureKind::AuthenticationFailed => "authentication_failed",
            FailureKind::InvalidRequest => "invalid_request",
            FailureKind::InvalidOutput => "invalid_output",
            FailureKind::Unconfigured => "unconfigured",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure reported by an external collaborator (reading store,
/// record store, summary generator, telephony dispatcher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct CollaboratorError {
    pub kind: FailureKind,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

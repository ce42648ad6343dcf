use thiserror::Error;
use vitalcall_core::{CollaboratorError, FailureKind};

#[derive(Debug, Error)]
pub enum TelephonyError {
    #[error("telephony not configured: missing {0}")]
    Unconfigured(String),

    #[error("Twilio API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Twilio request timed out: {0}")]
    Timeout(String),

    #[error("Twilio transport error: {0}")]
    Transport(String),

    #[error("Twilio response parsing failed: {0}")]
    ResponseParse(String),

    #[error("call not found: {0}")]
    CallNotFound(String),

    #[error("blocking task failed: {0}")]
    Join(String),
}

impl TelephonyError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TelephonyError::Unconfigured(_) => FailureKind::Unconfigured,
            TelephonyError::Api { status, .. } => classify_http_status(*status),
            TelephonyError::Timeout(_) => FailureKind::Timeout,
            TelephonyError::Transport(_) | TelephonyError::Join(_) => {
                FailureKind::ServiceUnavailable
            }
            TelephonyError::ResponseParse(_) => FailureKind::InvalidOutput,
            TelephonyError::CallNotFound(_) => FailureKind::InvalidRequest,
        }
    }
}

/// Classify a non-success HTTP status from the Twilio API.
pub fn classify_http_status(status: u16) -> FailureKind {
    match status {
        401 | 403 => FailureKind::AuthenticationFailed,
        429 => FailureKind::RateLimited,
        400..=499 => FailureKind::InvalidRequest,
        _ => FailureKind::ServiceUnavailable,
    }
}

impl From<TelephonyError> for CollaboratorError {
    fn from(e: TelephonyError) -> Self {
        CollaboratorError::new(e.kind(), e.to_string())
    }
}

impl From<ureq::Error> for TelephonyError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Timeout(_) => TelephonyError::Timeout(e.to_string()),
            other => TelephonyError::Transport(other.to_string()),
        }
    }
}

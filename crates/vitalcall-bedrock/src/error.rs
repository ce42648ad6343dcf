use aws_sdk_bedrockruntime::error::SdkError;
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use thiserror::Error;
use vitalcall_core::{CollaboratorError, FailureKind};

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation failed ({kind}): {message}")]
    Invocation { kind: FailureKind, message: String },

    #[error("request construction failed: {0}")]
    Request(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("summary rejected: {0}")]
    Rejected(String),
}

impl BedrockError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BedrockError::Invocation { kind, .. } => *kind,
            BedrockError::Request(_) => FailureKind::InvalidRequest,
            BedrockError::ResponseParse(_) | BedrockError::Rejected(_) => {
                FailureKind::InvalidOutput
            }
        }
    }
}

impl From<BedrockError> for CollaboratorError {
    fn from(e: BedrockError) -> Self {
        CollaboratorError::new(e.kind(), e.to_string())
    }
}

/// Classify a modelled Converse failure.
pub fn classify_service_error(err: &ConverseError) -> FailureKind {
    if err.is_throttling_exception() {
        FailureKind::RateLimited
    } else if err.is_service_unavailable_exception()
        || err.is_internal_server_exception()
        || err.is_model_not_ready_exception()
    {
        FailureKind::ServiceUnavailable
    } else if err.is_model_timeout_exception() {
        FailureKind::Timeout
    } else if err.is_access_denied_exception() {
        FailureKind::AuthenticationFailed
    } else if err.is_validation_exception() || err.is_resource_not_found_exception() {
        FailureKind::InvalidRequest
    } else {
        FailureKind::ServiceUnavailable
    }
}

/// Classify any failure of a Converse call, including transport failures.
pub fn classify_converse_error<R>(err: &SdkError<ConverseError, R>) -> FailureKind {
    match err {
        SdkError::TimeoutError(_) => FailureKind::Timeout,
        SdkError::DispatchFailure(failure) if failure.is_timeout() => FailureKind::Timeout,
        SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            FailureKind::ServiceUnavailable
        }
        SdkError::ConstructionFailure(_) => FailureKind::InvalidRequest,
        SdkError::ServiceError(ctx) => classify_service_error(ctx.err()),
        _ => FailureKind::ServiceUnavailable,
    }
}

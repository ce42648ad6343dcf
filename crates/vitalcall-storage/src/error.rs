use thiserror::Error;
use vitalcall_core::{CollaboratorError, FailureKind};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("object already exists: {key}")]
    AlreadyExists { key: String },

    #[error("precondition failed for key: {key}")]
    PreconditionFailed { key: String },

    #[error("gave up updating {key} after {attempts} conflicting writes")]
    Conflict { key: String, attempts: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),
}

impl From<StorageError> for CollaboratorError {
    fn from(e: StorageError) -> Self {
        let kind = match &e {
            StorageError::NotFound { .. } | StorageError::AlreadyExists { .. } => {
                FailureKind::InvalidRequest
            }
            StorageError::Serialization(_) => FailureKind::InvalidOutput,
            StorageError::PreconditionFailed { .. }
            | StorageError::Conflict { .. }
            | StorageError::GetObject(_)
            | StorageError::PutObject(_) => FailureKind::ServiceUnavailable,
        };
        CollaboratorError::new(kind, e.to_string())
    }
}

use thiserror::Error;
use vitalcall_core::CollaboratorError;
use vitalcall_risk::error::RiskError;

/// Terminal outcome classes for the operations of the orchestrator.
///
/// Collaborator errors never escape raw; each is wrapped into one of these.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("no readings for patient {patient_id} in the last {window_hours} hour(s)")]
    NoData {
        patient_id: String,
        window_hours: u32,
    },

    #[error("summary generation failed after {attempts} attempt(s): {source}")]
    Summary {
        attempts: u32,
        #[source]
        source: CollaboratorError,
    },

    #[error("call dispatch failed: {0}")]
    Dispatch(#[source] CollaboratorError),

    #[error("call not found: {0}")]
    NotFound(String),

    #[error("reading lookup failed: {0}")]
    ReadingStore(#[source] CollaboratorError),

    #[error("call record store failed: {0}")]
    RecordStore(#[source] CollaboratorError),

    #[error("risk assessment failed: {0}")]
    Risk(#[from] RiskError),
}

impl OrchestrationError {
    /// Short class name used in audit events and logs.
    pub fn class(&self) -> &'static str {
        match self {
            OrchestrationError::NoData { .. } => "no_data",
            OrchestrationError::Summary { .. } => "summary",
            OrchestrationError::Dispatch(_) => "dispatch",
            OrchestrationError::NotFound(_) => "not_found",
            OrchestrationError::ReadingStore(_) => "reading_store",
            OrchestrationError::RecordStore(_) => "record_store",
            OrchestrationError::Risk(_) => "risk",
        }
    }
}

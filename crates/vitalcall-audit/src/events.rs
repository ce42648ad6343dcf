use serde::Serialize;
use tracing::info;

/// What an audit event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// A dispatched call, keyed by call id.
    Call,
    /// A patient, before any call record exists.
    Patient,
    /// A dispatcher-side call, keyed by its handle (e.g. a Twilio SID).
    DispatcherCall,
}

impl Subject {
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Call => "call",
            Subject::Patient => "patient",
            Subject::DispatcherCall => "dispatcher_call",
        }
    }
}

/// One step of a call's life, logged via `tracing` next to the service logs.
///
/// The call record store holds the durable state; these events record who
/// moved it and why.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub subject: Subject,
    pub subject_id: String,
    /// Component that caused the event (`orchestrator`, `twilio`, ...).
    pub actor: String,
    pub recorded_at: jiff::Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        subject: Subject,
        subject_id: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            subject,
            subject_id: subject_id.into(),
            actor: actor.into(),
            recorded_at: jiff::Timestamp::now(),
            details: None,
        }
    }

    pub fn call(action: impl Into<String>, call_id: impl Into<String>, actor: impl Into<String>) -> Self {
        Self::new(action, Subject::Call, call_id, actor)
    }

    pub fn patient(
        action: impl Into<String>,
        patient_id: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self::new(action, Subject::Patient, patient_id, actor)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.subject = self.subject.as_str(),
            audit.subject_id = %self.subject_id,
            audit.actor = %self.actor,
            audit.recorded_at = %self.recorded_at,
            audit.details = %details,
            "audit event"
        );
    }
}

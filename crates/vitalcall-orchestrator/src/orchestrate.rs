use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};
use vitalcall_audit::events::AuditEvent;
use vitalcall_core::{CollaboratorError, FailureKind};
use vitalcall_core::models::call::{
    CallRecord, CallStatus, StatusEvent, Transition, new_call_id, summary_preview,
};
use vitalcall_core::models::digest::VitalsDigest;
use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::risk::RiskResult;
use vitalcall_core::models::summary::{GeneratedSummary, SummaryRequest};
use vitalcall_core::ports::{
    CallRecordStore, DispatchReceipt, DispatchRequest, Dispatcher, ReadingStore,
    SummaryGenerator, UpdateOutcome,
};
use vitalcall_risk::digest;
use vitalcall_risk::error::RiskError;
use vitalcall_risk::thresholds::Thresholds;

use crate::error::OrchestrationError;
use crate::retry::{self, RetryPolicy};

const ACTOR: &str = "orchestrator";

/// Risk assessment of a patient's recent window, without placing a call.
#[derive(Debug, Clone, Serialize)]
pub struct PatientAssessment {
    pub patient_id: String,
    pub window_hours: u32,
    pub readings_analyzed: usize,
    pub risk: RiskResult,
    pub digest: VitalsDigest,
}

/// Wires the collaborators together and owns call record mutation.
///
/// Collaborators are trait objects chosen at startup; the orchestrator never
/// inspects which implementation it was given.
pub struct Orchestrator {
    readings: Arc<dyn ReadingStore>,
    records: Arc<dyn CallRecordStore>,
    summarizer: Arc<dyn SummaryGenerator>,
    dispatcher: Arc<dyn Dispatcher>,
    fallback: Option<Arc<dyn Dispatcher>>,
    thresholds: Thresholds,
    retry_policy: RetryPolicy,
}

impl Orchestrator {
    pub fn new(
        readings: Arc<dyn ReadingStore>,
        records: Arc<dyn CallRecordStore>,
        summarizer: Arc<dyn SummaryGenerator>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            readings,
            records,
            summarizer,
            dispatcher,
            fallback: None,
            thresholds: Thresholds::default(),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Dispatcher used when the primary one is unconfigured or unavailable.
    pub fn with_fallback(mut self, fallback: Arc<dyn Dispatcher>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn dispatcher_name(&self) -> &str {
        self.dispatcher.name()
    }

    /// Assess an explicit set of readings against the configured thresholds.
    pub fn assess(&self, readings: &[Reading]) -> Result<RiskResult, RiskError> {
        vitalcall_risk::assess(readings, &self.thresholds)
    }

    /// Readings for a patient's window, oldest first. May be empty.
    pub async fn recent_readings(
        &self,
        patient_id: &str,
        window_hours: u32,
    ) -> Result<Vec<Reading>, OrchestrationError> {
        self.readings
            .fetch(patient_id, window_hours)
            .await
            .map_err(OrchestrationError::ReadingStore)
    }

    /// Assess a patient's recent window without dispatching anything.
    pub async fn assess_patient(
        &self,
        patient_id: &str,
        window_hours: u32,
    ) -> Result<PatientAssessment, OrchestrationError> {
        let readings = self.window(patient_id, window_hours).await?;
        let risk = self.assess(&readings)?;
        let digest = digest::digest(&readings, window_hours)?;
        Ok(PatientAssessment {
            patient_id: patient_id.to_string(),
            window_hours,
            readings_analyzed: readings.len(),
            risk,
            digest,
        })
    }

    /// Run the full pipeline for one patient and return the new call record.
    ///
    /// Any failure aborts before a record is created. On success the
    /// record is `initiated`, or further along if the dispatcher already
    /// reported progress.
    pub async fn orchestrate(
        &self,
        patient_id: &str,
        window_hours: u32,
    ) -> Result<CallRecord, OrchestrationError> {
        AuditEvent::patient("orchestration_started", patient_id, ACTOR)
            .with_details(json!({ "window_hours": window_hours }))
            .emit();

        match self.run_pipeline(patient_id, window_hours).await {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(patient_id, class = e.class(), error = %e, "orchestration failed");
                AuditEvent::patient("orchestration_failed", patient_id, ACTOR)
                    .with_details(json!({ "class": e.class(), "error": e.to_string() }))
                    .emit();
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        patient_id: &str,
        window_hours: u32,
    ) -> Result<CallRecord, OrchestrationError> {
        // 1. Readings
        let readings = self.window(patient_id, window_hours).await?;

        // 2. Risk
        let risk = self.assess(&readings)?;
        let digest = digest::digest(&readings, window_hours)?;
        info!(
            patient_id,
            readings = readings.len(),
            risk_level = %risk.risk_level,
            signals = risk.signals.len(),
            "risk assessed"
        );

        // 3. Summary
        let request = SummaryRequest {
            patient_id: patient_id.to_string(),
            digest,
            risk,
        };
        let summary = self.generate_summary(&request).await?;

        // 4. Dispatch
        let dispatch = DispatchRequest {
            call_id: new_call_id(),
            patient_id: patient_id.to_string(),
            summary_text: summary.text.clone(),
        };
        let (receipt, dispatcher, fallback_used) = self.dispatch(&dispatch).await?;

        // 5. Record
        let now = jiff::Timestamp::now();
        let mut record = CallRecord {
            call_id: dispatch.call_id.clone(),
            patient_id: patient_id.to_string(),
            created_at: now,
            updated_at: now,
            status: CallStatus::Initiated,
            risk_level: request.risk.risk_level,
            summary_preview: summary_preview(&summary.text),
            summary_text: summary.text,
            handle: receipt.handle,
            dispatcher: dispatcher.to_string(),
            readings_analyzed: readings.len(),
            completed_at: None,
            duration_seconds: None,
        };

        self.records.insert(record.clone()).await.map_err(|e| {
            error!(
                call_id = %record.call_id,
                handle = %record.handle,
                error = %e,
                "call placed but its record could not be stored"
            );
            OrchestrationError::RecordStore(e)
        })?;

        AuditEvent::call("call_dispatched", &record.call_id, ACTOR)
            .with_details(json!({
                "patient_id": patient_id,
                "risk_level": record.risk_level,
                "dispatcher": record.dispatcher,
                "fallback_used": fallback_used,
                "handle": record.handle,
            }))
            .emit();

        // The call is placed and recorded; a failed status write leaves it
        // at `initiated` for callbacks or polling to advance.
        if let Some(update) = receipt.reported {
            match self.records.apply(&record.call_id, update).await {
                Ok(Some(outcome)) => {
                    audit_transition(&record.call_id, dispatcher, &outcome.transition);
                    record = outcome.record;
                }
                Ok(None) => {}
                Err(e) => warn!(
                    call_id = %record.call_id,
                    error = %e,
                    "could not store dispatcher-reported status"
                ),
            }
        }

        info!(
            call_id = %record.call_id,
            patient_id,
            status = %record.status,
            dispatcher = %record.dispatcher,
            "call orchestrated"
        );
        Ok(record)
    }

    /// Fetch a non-empty reading window.
    async fn window(
        &self,
        patient_id: &str,
        window_hours: u32,
    ) -> Result<Vec<Reading>, OrchestrationError> {
        let readings = self.recent_readings(patient_id, window_hours).await?;
        if readings.is_empty() {
            return Err(OrchestrationError::NoData {
                patient_id: patient_id.to_string(),
                window_hours,
            });
        }
        Ok(readings)
    }

    async fn generate_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<GeneratedSummary, OrchestrationError> {
        let summary = retry::retry(&self.retry_policy, "generate_summary", || {
            self.summarizer.generate(request)
        })
        .await
        .map_err(|exhausted| OrchestrationError::Summary {
            attempts: exhausted.attempts,
            source: exhausted.last,
        })?;

        info!(
            patient_id = %request.patient_id,
            model = %summary.model_id,
            words = summary.word_count,
            input_tokens = summary.usage.tokens.input,
            output_tokens = summary.usage.tokens.output,
            "summary generated"
        );
        Ok(summary)
    }

    /// Dispatch through the primary dispatcher, falling back to the stub
    /// when the primary is unconfigured or unavailable.
    async fn dispatch(
        &self,
        request: &DispatchRequest,
    ) -> Result<(DispatchReceipt, &str, bool), OrchestrationError> {
        let primary_err = match self.dispatcher.dispatch(request).await {
            Ok(receipt) => return Ok((receipt, self.dispatcher.name(), false)),
            Err(e) => e,
        };

        let Some(fallback) = self.fallback.as_ref().filter(|_| falls_back(&primary_err)) else {
            return Err(OrchestrationError::Dispatch(primary_err));
        };

        warn!(
            call_id = %request.call_id,
            primary = self.dispatcher.name(),
            fallback = fallback.name(),
            kind = %primary_err.kind,
            error = %primary_err.message,
            "primary dispatcher failed, using fallback"
        );
        match fallback.dispatch(request).await {
            Ok(receipt) => Ok((receipt, fallback.name(), true)),
            Err(e) => Err(OrchestrationError::Dispatch(e)),
        }
    }

    /// Snapshot of a call record.
    pub async fn get_status(&self, call_id: &str) -> Result<CallRecord, OrchestrationError> {
        self.records
            .get(call_id)
            .await
            .map_err(OrchestrationError::RecordStore)?
            .ok_or_else(|| OrchestrationError::NotFound(call_id.to_string()))
    }

    /// Apply an asynchronous status event from a dispatcher.
    ///
    /// Duplicate, stale, and backward events come back as
    /// [`Transition::Ignored`]; they are not errors.
    pub async fn handle_status_event(
        &self,
        event: &StatusEvent,
    ) -> Result<UpdateOutcome, OrchestrationError> {
        let call_id = self
            .records
            .find_by_handle(&event.handle)
            .await
            .map_err(OrchestrationError::RecordStore)?
            .ok_or_else(|| OrchestrationError::NotFound(event.handle.clone()))?;

        let outcome = self
            .records
            .apply(&call_id, event.update)
            .await
            .map_err(OrchestrationError::RecordStore)?
            .ok_or_else(|| OrchestrationError::NotFound(call_id.clone()))?;

        audit_transition(&call_id, "status_event", &outcome.transition);
        Ok(outcome)
    }

    /// Poll the dispatcher that placed the call and apply what it reports.
    ///
    /// A failed poll leaves the stored record as it was.
    pub async fn refresh_status(&self, call_id: &str) -> Result<CallRecord, OrchestrationError> {
        let record = self.get_status(call_id).await?;
        if record.status.is_terminal() {
            return Ok(record);
        }

        let Some(dispatcher) = self.dispatcher_named(&record.dispatcher) else {
            warn!(call_id, dispatcher = %record.dispatcher, "no dispatcher to poll");
            return Ok(record);
        };

        let update = match dispatcher.fetch_status(&record.handle).await {
            Ok(update) => update,
            Err(e) => {
                warn!(call_id, kind = %e.kind, error = %e.message, "status poll failed");
                return Ok(record);
            }
        };

        let outcome = self
            .records
            .apply(call_id, update)
            .await
            .map_err(OrchestrationError::RecordStore)?
            .ok_or_else(|| OrchestrationError::NotFound(call_id.to_string()))?;

        audit_transition(call_id, "status_poll", &outcome.transition);
        Ok(outcome.record)
    }

    fn dispatcher_named(&self, name: &str) -> Option<&Arc<dyn Dispatcher>> {
        std::iter::once(&self.dispatcher)
            .chain(self.fallback.iter())
            .find(|d| d.name() == name)
    }
}

fn falls_back(err: &CollaboratorError) -> bool {
    matches!(
        err.kind,
        FailureKind::Unconfigured | FailureKind::ServiceUnavailable
    )
}

fn audit_transition(call_id: &str, actor: &str, transition: &Transition) {
    match transition {
        Transition::Applied { from, to } => {
            info!(call_id, %from, %to, "call status updated");
            AuditEvent::call("status_applied", call_id, actor)
                .with_details(json!({ "from": from, "to": to }))
                .emit();
        }
        Transition::Ignored { current, requested } => {
            info!(call_id, %current, %requested, "call status update ignored");
            AuditEvent::call("status_ignored", call_id, actor)
                .with_details(json!({ "current": current, "requested": requested }))
                .emit();
        }
    }
}

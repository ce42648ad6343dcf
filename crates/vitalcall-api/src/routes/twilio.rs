use axum::Form;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use vitalcall_audit::events::{AuditEvent, Subject};
use vitalcall_core::models::call::StatusEvent;
use vitalcall_orchestrator::OrchestrationError;
use vitalcall_telephony::status::twilio_update;
use vitalcall_telephony::twiml;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VoiceQuery {
    pub call_id: Option<String>,
}

fn twiml_response(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/xml")], body)
}

/// TwiML for an answered call. Always 200: Twilio reads errors aloud.
pub async fn voice(
    State(state): State<AppState>,
    Query(query): Query<VoiceQuery>,
) -> impl IntoResponse {
    let Some(call_id) = query.call_id.filter(|id| !id.is_empty()) else {
        return twiml_response(twiml::spoken_error(twiml::MISSING_CALL_ID));
    };

    let body = match state.orchestrator.get_status(&call_id).await {
        Ok(record) => twiml::summary_call(&record.summary_text),
        Err(OrchestrationError::NotFound(_)) => twiml::spoken_error(twiml::CALL_NOT_FOUND),
        Err(e) => {
            tracing::error!(call_id = %call_id, error = %e, "voice webhook lookup failed");
            twiml::spoken_error(twiml::CALL_NOT_FOUND)
        }
    };
    twiml_response(body)
}

/// Form fields Twilio posts to the status callback.
#[derive(Debug, Deserialize)]
pub struct StatusCallback {
    #[serde(rename = "CallSid")]
    pub call_sid: String,
    #[serde(rename = "CallStatus")]
    pub call_status: String,
    #[serde(rename = "CallDuration", default)]
    pub call_duration: Option<String>,
}

pub async fn status_callback(
    State(state): State<AppState>,
    Form(form): Form<StatusCallback>,
) -> Result<StatusCode, ApiError> {
    let event = StatusEvent {
        handle: form.call_sid,
        update: twilio_update(&form.call_status, form.call_duration.as_deref()),
    };

    AuditEvent::new(
        "status_callback_received",
        Subject::DispatcherCall,
        &event.handle,
        "twilio",
    )
    .with_details(json!({
        "twilio_status": form.call_status,
        "status": event.update.status,
        "duration_seconds": event.update.duration_seconds,
    }))
    .emit();

    state.orchestrator.handle_status_event(&event).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use vitalcall_core::models::call::{CallRecord, CallStatus};
use vitalcall_core::models::risk::RiskLevel;

use crate::error::ApiError;
use crate::routes::window_hours;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CallDoctorRequest {
    pub patient_id: String,
    #[serde(default)]
    pub hours: Option<u32>,
}

/// A call record as returned to API clients. The full summary text stays
/// server-side; only the preview is exposed.
#[derive(Debug, Serialize)]
pub struct CallView {
    pub call_id: String,
    pub patient_id: String,
    pub status: CallStatus,
    pub risk_level: RiskLevel,
    pub summary_preview: String,
    pub dispatcher: String,
    pub readings_analyzed: usize,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    pub completed_at: Option<jiff::Timestamp>,
    pub duration_seconds: Option<u64>,
}

impl From<CallRecord> for CallView {
    fn from(r: CallRecord) -> Self {
        Self {
            call_id: r.call_id,
            patient_id: r.patient_id,
            status: r.status,
            risk_level: r.risk_level,
            summary_preview: r.summary_preview,
            dispatcher: r.dispatcher,
            readings_analyzed: r.readings_analyzed,
            created_at: r.created_at,
            updated_at: r.updated_at,
            completed_at: r.completed_at,
            duration_seconds: r.duration_seconds,
        }
    }
}

pub async fn call_doctor(
    State(state): State<AppState>,
    Json(req): Json<CallDoctorRequest>,
) -> Result<Json<CallView>, ApiError> {
    let patient_id = req.patient_id.trim();
    if patient_id.is_empty() {
        return Err(ApiError::BadRequest("patient_id is required".to_string()));
    }
    let hours = window_hours(req.hours)?;

    let record = state.orchestrator.orchestrate(patient_id, hours).await?;
    Ok(Json(record.into()))
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub refresh: bool,
}

pub async fn call_status(
    State(state): State<AppState>,
    Path(call_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<CallView>, ApiError> {
    let record = if query.refresh {
        state.orchestrator.refresh_status(&call_id).await?
    } else {
        state.orchestrator.get_status(&call_id).await?
    };
    Ok(Json(record.into()))
}

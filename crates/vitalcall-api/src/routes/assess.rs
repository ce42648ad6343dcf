use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::risk::RiskResult;
use vitalcall_orchestrator::PatientAssessment;

use crate::error::ApiError;
use crate::routes::{WindowQuery, window_hours};
use crate::state::AppState;

/// Assess a stored patient's recent window.
pub async fn assess_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<PatientAssessment>, ApiError> {
    let hours = window_hours(query.hours)?;
    let assessment = state.orchestrator.assess_patient(&patient_id, hours).await?;
    Ok(Json(assessment))
}

#[derive(Deserialize)]
pub struct AssessRequest {
    pub readings: Vec<Reading>,
}

/// Assess readings supplied in the request body.
pub async fn assess_readings(
    State(state): State<AppState>,
    Json(mut req): Json<AssessRequest>,
) -> Result<Json<RiskResult>, ApiError> {
    req.readings.sort_by_key(|r| r.timestamp);
    let result = state.orchestrator.assess(&req.readings)?;
    Ok(Json(result))
}

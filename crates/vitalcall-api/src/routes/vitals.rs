use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Serialize;
use vitalcall_core::models::reading::Reading;

use crate::error::ApiError;
use crate::routes::{WindowQuery, window_hours};
use crate::state::AppState;

#[derive(Serialize)]
pub struct RecentVitals {
    patient_id: String,
    window_hours: u32,
    count: usize,
    readings: Vec<Reading>,
}

pub async fn recent_vitals(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<RecentVitals>, ApiError> {
    let hours = window_hours(query.hours)?;
    let readings = state
        .orchestrator
        .recent_readings(&patient_id, hours)
        .await?;

    if readings.is_empty() {
        return Err(ApiError::NotFound(format!(
            "no readings for patient {patient_id} in the last {hours} hour(s)"
        )));
    }

    Ok(Json(RecentVitals {
        patient_id,
        window_hours: hours,
        count: readings.len(),
        readings,
    }))
}

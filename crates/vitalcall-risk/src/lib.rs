//! vitalcall-risk
//!
//! Rule-based risk assessment over a window of vital-sign readings. Pure:
//! no I/O and no shared state, safe to call from any number of tasks.
//!
//! Classifies raw numbers against a fixed threshold table; it never infers
//! a diagnosis.

pub mod aggregate;
pub mod analyzers;
pub mod digest;
pub mod error;
pub mod stats;
pub mod thresholds;

use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::risk::RiskResult;

use error::RiskError;
use thresholds::Thresholds;

/// Assess a window of readings (oldest first).
///
/// Each analyzer contributes at most one signal; the risk level is the
/// most severe signal found. Fails with [`RiskError::NoReadings`] on an
/// empty window.
pub fn assess(readings: &[Reading], thresholds: &Thresholds) -> Result<RiskResult, RiskError> {
    if readings.is_empty() {
        return Err(RiskError::NoReadings);
    }

    let signals: Vec<_> = analyzers::all_analyzers()
        .iter()
        .filter_map(|a| a.analyze(readings, thresholds))
        .collect();

    Ok(RiskResult {
        risk_level: aggregate::risk_level(&signals),
        signals,
        summary: stats::summarize(readings),
    })
}

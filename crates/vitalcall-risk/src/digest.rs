//! Readings-derived statistics for the summary generator.

use vitalcall_core::models::digest::{Trend, VitalsDigest};
use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::vital::Vital;

use crate::error::RiskError;
use crate::stats;

const HEART_RATE_SHIFT: f64 = 10.0;
const SPO2_SHIFT: f64 = 2.0;
const SYSTOLIC_SHIFT: f64 = 10.0;

/// Compare the first quarter of the window against the last quarter.
///
/// Deteriorating when heart rate or systolic pressure rose, or SpO2 fell,
/// past its shift limit; improving for the mirror image; stable otherwise.
pub fn trend(readings: &[Reading]) -> Trend {
    if readings.is_empty() {
        return Trend::Stable;
    }

    let split = (readings.len() / 4).max(1);
    let first = &readings[..split];
    let last = &readings[readings.len() - split..];

    let change = |v: Vital| stats::mean(last, v) - stats::mean(first, v);
    let hr = change(Vital::HeartRate);
    let spo2 = change(Vital::Spo2);
    let sys = change(Vital::SystolicBp);

    if hr > HEART_RATE_SHIFT || spo2 < -SPO2_SHIFT || sys > SYSTOLIC_SHIFT {
        Trend::Deteriorating
    } else if hr < -HEART_RATE_SHIFT || spo2 > SPO2_SHIFT || sys < -SYSTOLIC_SHIFT {
        Trend::Improving
    } else {
        Trend::Stable
    }
}

/// Build the digest for a window of readings (oldest first).
pub fn digest(readings: &[Reading], window_hours: u32) -> Result<VitalsDigest, RiskError> {
    let (first, last) = match (readings.first(), readings.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(RiskError::NoReadings),
    };

    Ok(VitalsDigest {
        window_hours,
        reading_count: readings.len(),
        start: first.timestamp,
        end: last.timestamp,
        age: first.age,
        gender: first.gender.clone(),
        trend: trend(readings),
        stats: stats::summarize(readings),
    })
}

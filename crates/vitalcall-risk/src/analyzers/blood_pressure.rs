use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::risk::{Severity, Signal};
use vitalcall_core::models::vital::Vital;

use super::{Analyzer, check_tier};
use crate::thresholds::Thresholds;

/// Systolic and diastolic pressure, judged independently but reported as a
/// single signal: extreme before mild, systolic before diastolic.
pub struct BloodPressure;

impl Analyzer for BloodPressure {
    fn id(&self) -> &str {
        "blood_pressure"
    }

    fn analyze(&self, readings: &[Reading], thresholds: &Thresholds) -> Option<Signal> {
        [Severity::Extreme, Severity::Mild]
            .into_iter()
            .flat_map(|tier| [(tier, Vital::SystolicBp), (tier, Vital::DiastolicBp)])
            .find_map(|(tier, vital)| check_tier(readings, vital, tier, thresholds))
    }
}

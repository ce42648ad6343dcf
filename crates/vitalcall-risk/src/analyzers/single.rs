use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::risk::{Severity, Signal};
use vitalcall_core::models::vital::Vital;

use super::{Analyzer, check_tier};
use crate::thresholds::Thresholds;

/// Analyzer for a vital judged on its own (everything but blood pressure).
pub struct SingleVital {
    id: &'static str,
    vital: Vital,
}

impl SingleVital {
    pub fn new(id: &'static str, vital: Vital) -> Self {
        Self { id, vital }
    }
}

impl Analyzer for SingleVital {
    fn id(&self) -> &str {
        self.id
    }

    fn analyze(&self, readings: &[Reading], thresholds: &Thresholds) -> Option<Signal> {
        check_tier(readings, self.vital, Severity::Extreme, thresholds)
            .or_else(|| check_tier(readings, self.vital, Severity::Mild, thresholds))
    }
}

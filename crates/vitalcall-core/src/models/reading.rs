use serde::{Deserialize, Serialize};

/// One vital-sign sample for a patient at an instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub patient_id: String,
    pub timestamp: jiff::Timestamp,
    /// Beats per minute.
    pub heart_rate: f64,
    /// Breaths per minute.
    pub respiratory_rate: f64,
    /// Degrees Celsius.
    pub body_temperature: f64,
    /// Oxygen saturation, percent.
    pub spo2: f64,
    /// mmHg.
    pub systolic_bp: u16,
    /// mmHg.
    pub diastolic_bp: u16,
    pub age: u32,
    pub gender: String,
}

impl Reading {
    pub fn pulse_pressure(&self) -> f64 {
        f64::from(self.systolic_bp) - f64::from(self.diastolic_bp)
    }

    pub fn mean_arterial_pressure(&self) -> f64 {
        f64::from(self.diastolic_bp) + self.pulse_pressure() / 3.0
    }
}

use serde::{Deserialize, Serialize};

use super::reading::Reading;

/// A measured vital sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    HeartRate,
    Spo2,
    SystolicBp,
    DiastolicBp,
    RespiratoryRate,
    Temperature,
}

impl Vital {
    pub const ALL: [Vital; 6] = [
        Vital::HeartRate,
        Vital::Spo2,
        Vital::SystolicBp,
        Vital::DiastolicBp,
        Vital::RespiratoryRate,
        Vital::Temperature,
    ];

    /// The value of this vital in a reading.
    pub fn value(self, reading: &Reading) -> f64 {
        match self {
            Vital::HeartRate => reading.heart_rate,
            Vital::Spo2 => reading.spo2,
            Vital::SystolicBp => f64::from(reading.systolic_bp),
            Vital::DiastolicBp => f64::from(reading.diastolic_bp),
            Vital::RespiratoryRate => reading.respiratory_rate,
            Vital::Temperature => reading.body_temperature,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Vital::HeartRate => "heart rate",
            Vital::Spo2 => "oxygen saturation",
            Vital::SystolicBp => "systolic blood pressure",
            Vital::DiastolicBp => "diastolic blood pressure",
            Vital::RespiratoryRate => "respiratory rate",
            Vital::Temperature => "body temperature",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Vital::HeartRate => "bpm",
            Vital::Spo2 => "%",
            Vital::SystolicBp | Vital::DiastolicBp => "mmhg",
            Vital::RespiratoryRate => "breaths/min",
            Vital::Temperature => "°c",
        }
    }

    /// Format a value with this vital's unit and display precision.
    pub fn format_value(self, value: f64) -> String {
        match self {
            Vital::SystolicBp | Vital::DiastolicBp => format!("{value:.0} {}", self.unit()),
            Vital::Spo2 | Vital::Temperature => format!("{value:.1}{}", self.unit()),
            Vital::HeartRate | Vital::RespiratoryRate => format!("{value:.1} {}", self.unit()),
        }
    }

    /// Format a threshold bound (no forced precision, so `120` stays `120`).
    pub fn format_bound(self, bound: f64) -> String {
        match self {
            Vital::Spo2 | Vital::Temperature => format!("{bound}{}", self.unit()),
            _ => format!("{bound} {}", self.unit()),
        }
    }
}

//! Threshold table for the analyzers.
//!
//! Each vital has a normal band and an extreme band. A value past a normal
//! bound but not past the matching extreme bound is in the mild tier.
//! Bounds are strict: a value equal to a bound is on the normal side.

use serde::{Deserialize, Serialize};

use vitalcall_core::models::vital::Vital;

use crate::error::RiskError;

/// Minimum fraction of readings that must individually cross a bound for a
/// crossing mean to count as sustained.
pub const SUSTAINED_FRACTION: f64 = 0.4;

/// Bounds for one vital. A missing bound means that side is never flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub normal_low: Option<f64>,
    pub normal_high: Option<f64>,
    pub extreme_low: Option<f64>,
    pub extreme_high: Option<f64>,
}

impl Band {
    const fn both(normal_low: f64, normal_high: f64, extreme_low: f64, extreme_high: f64) -> Self {
        Self {
            normal_low: Some(normal_low),
            normal_high: Some(normal_high),
            extreme_low: Some(extreme_low),
            extreme_high: Some(extreme_high),
        }
    }

    fn validate(&self, vital: Vital) -> Result<(), RiskError> {
        let invalid = |msg: String| Err(RiskError::InvalidThresholds(format!("{}: {msg}", vital.label())));

        if let (Some(lo), Some(hi)) = (self.normal_low, self.normal_high)
            && lo >= hi
        {
            return invalid(format!("normal_low {lo} must be below normal_high {hi}"));
        }
        if let (Some(normal), Some(extreme)) = (self.normal_high, self.extreme_high)
            && extreme <= normal
        {
            return invalid(format!("extreme_high {extreme} must be above normal_high {normal}"));
        }
        if let (Some(normal), Some(extreme)) = (self.normal_low, self.extreme_low)
            && extreme >= normal
        {
            return invalid(format!("extreme_low {extreme} must be below normal_low {normal}"));
        }
        if self.extreme_high.is_some() && self.normal_high.is_none() {
            return invalid("extreme_high requires normal_high".to_string());
        }
        if self.extreme_low.is_some() && self.normal_low.is_none() {
            return invalid("extreme_low requires normal_low".to_string());
        }
        Ok(())
    }
}

/// Full threshold table. Deserializing fills omitted vitals with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub heart_rate: Band,
    pub spo2: Band,
    pub systolic_bp: Band,
    pub diastolic_bp: Band,
    pub respiratory_rate: Band,
    pub temperature: Band,
    pub sustained_fraction: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            heart_rate: Band::both(60.0, 100.0, 50.0, 120.0),
            // High saturation is never abnormal.
            spo2: Band {
                normal_low: Some(95.0),
                normal_high: None,
                extreme_low: Some(92.0),
                extreme_high: None,
            },
            systolic_bp: Band::both(90.0, 140.0, 85.0, 160.0),
            diastolic_bp: Band::both(60.0, 90.0, 50.0, 100.0),
            respiratory_rate: Band::both(12.0, 20.0, 10.0, 24.0),
            temperature: Band::both(36.1, 37.2, 35.5, 38.0),
            sustained_fraction: SUSTAINED_FRACTION,
        }
    }
}

impl Thresholds {
    pub fn band(&self, vital: Vital) -> &Band {
        match vital {
            Vital::HeartRate => &self.heart_rate,
            Vital::Spo2 => &self.spo2,
            Vital::SystolicBp => &self.systolic_bp,
            Vital::DiastolicBp => &self.diastolic_bp,
            Vital::RespiratoryRate => &self.respiratory_rate,
            Vital::Temperature => &self.temperature,
        }
    }

    /// Check band ordering and the sustained fraction.
    pub fn validate(&self) -> Result<(), RiskError> {
        if !(self.sustained_fraction > 0.0 && self.sustained_fraction <= 1.0) {
            return Err(RiskError::InvalidThresholds(format!(
                "sustained_fraction {} must be in (0, 1]",
                self.sustained_fraction
            )));
        }
        for vital in Vital::ALL {
            self.band(vital).validate(vital)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON threshold table.
    pub fn from_json(json: &str) -> Result<Self, RiskError> {
        let thresholds: Thresholds = serde_json::from_str(json)?;
        thresholds.validate()?;
        Ok(thresholds)
    }
}

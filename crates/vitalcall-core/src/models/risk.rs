use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::vital::Vital;

/// Severity tier of a detected abnormality. Ordered: `Mild < Extreme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Extreme,
}

/// Which side of the normal band a value fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    High,
    Low,
}

/// Numbers backing a signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalEvidence {
    pub threshold: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Fraction (0–1) of readings individually past the threshold.
    pub fraction_crossing: f64,
}

/// An abnormality finding for one vital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub vital: Vital,
    pub severity: Severity,
    pub direction: Direction,
    pub description: String,
    pub evidence: SignalEvidence,
}

/// Categorical risk. Ordered: `Low < Moderate < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for RiskLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Mild => RiskLevel::Moderate,
            Severity::Extreme => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Output of a risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_level: RiskLevel,
    /// Most-severe vitals first in analyzer order; at most one per analyzer.
    pub signals: Vec<Signal>,
    pub summary: BTreeMap<Vital, VitalStats>,
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::risk::VitalStats;
use super::vital::Vital;

/// Direction the key vitals moved over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Deteriorating,
    Stable,
    Improving,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Deteriorating => "deteriorating",
            Trend::Stable => "stable",
            Trend::Improving => "improving",
        }
    }
}

/// Readings-derived statistics handed to the summary generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsDigest {
    pub window_hours: u32,
    pub reading_count: usize,
    pub start: jiff::Timestamp,
    pub end: jiff::Timestamp,
    pub age: u32,
    pub gender: String,
    pub trend: Trend,
    pub stats: BTreeMap<Vital, VitalStats>,
}

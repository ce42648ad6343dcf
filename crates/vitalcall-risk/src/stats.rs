use std::collections::BTreeMap;

use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::risk::{Direction, VitalStats};
use vitalcall_core::models::vital::Vital;

/// avg/min/max of one vital across the readings. `None` when empty.
pub fn vital_stats(readings: &[Reading], vital: Vital) -> Option<VitalStats> {
    if readings.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for r in readings {
        let v = vital.value(r);
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    Some(VitalStats {
        avg: sum / readings.len() as f64,
        min,
        max,
    })
}

/// Stats for every vital.
pub fn summarize(readings: &[Reading]) -> BTreeMap<Vital, VitalStats> {
    Vital::ALL
        .iter()
        .filter_map(|&v| vital_stats(readings, v).map(|s| (v, s)))
        .collect()
}

/// Mean of one vital, `0.0` for an empty slice.
pub fn mean(readings: &[Reading], vital: Vital) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    readings.iter().map(|r| vital.value(r)).sum::<f64>() / readings.len() as f64
}

/// Outcome of testing a vital against one bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Mean is past the bound AND enough individual readings are too.
    pub sustained: bool,
    /// Fraction (0–1) of readings strictly past the bound.
    pub fraction: f64,
}

/// Sustained-condition test: the mean must be strictly past `bound` and at
/// least `min_fraction` of the readings must individually be past it.
pub fn crossing(
    readings: &[Reading],
    vital: Vital,
    bound: f64,
    direction: Direction,
    avg: f64,
    min_fraction: f64,
) -> Crossing {
    if readings.is_empty() {
        return Crossing {
            sustained: false,
            fraction: 0.0,
        };
    }

    let past = |v: f64| match direction {
        Direction::High => v > bound,
        Direction::Low => v < bound,
    };

    let count = readings.iter().filter(|r| past(vital.value(r))).count();
    let fraction = count as f64 / readings.len() as f64;

    Crossing {
        sustained: past(avg) && fraction >= min_fraction,
        fraction,
    }
}

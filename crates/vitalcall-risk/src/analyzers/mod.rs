//! Per-vital analyzers.
//!
//! Every analyzer applies the sustained-condition rule to its vital(s) and
//! returns at most one signal, checking the extreme tier before the mild one.

pub mod blood_pressure;
pub mod single;

use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::risk::{Direction, Severity, Signal, SignalEvidence};
use vitalcall_core::models::vital::Vital;

use crate::stats;
use crate::thresholds::{Band, Thresholds};

/// Trait implemented by each analyzer.
pub trait Analyzer: Send + Sync {
    /// Identifier, e.g. `"heart_rate"`, `"blood_pressure"`.
    fn id(&self) -> &str;

    /// Inspect the whole window; `None` when nothing is sustained.
    fn analyze(&self, readings: &[Reading], thresholds: &Thresholds) -> Option<Signal>;
}

/// All analyzers, in the order their signals are reported.
pub fn all_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(single::SingleVital::new("heart_rate", Vital::HeartRate)),
        Box::new(single::SingleVital::new("spo2", Vital::Spo2)),
        Box::new(blood_pressure::BloodPressure),
        Box::new(single::SingleVital::new("respiratory_rate", Vital::RespiratoryRate)),
        Box::new(single::SingleVital::new("temperature", Vital::Temperature)),
    ]
}

/// Test one vital at one tier, high side first.
pub(crate) fn check_tier(
    readings: &[Reading],
    vital: Vital,
    severity: Severity,
    thresholds: &Thresholds,
) -> Option<Signal> {
    let band = thresholds.band(vital);
    let (high, low) = match severity {
        Severity::Extreme => (band.extreme_high, band.extreme_low),
        Severity::Mild => (band.normal_high, band.normal_low),
    };
    let vs = stats::vital_stats(readings, vital)?;

    [(Direction::High, high), (Direction::Low, low)]
        .into_iter()
        .find_map(|(direction, bound)| {
            let bound = bound?;
            // A mean already at or past the extreme bound belongs to the
            // extreme tier only; if that tier was not sustained, neither is this.
            if severity == Severity::Mild && mean_reaches_extreme(band, direction, vs.avg) {
                return None;
            }
            let c = stats::crossing(
                readings,
                vital,
                bound,
                direction,
                vs.avg,
                thresholds.sustained_fraction,
            );
            c.sustained.then(|| {
                let evidence = SignalEvidence {
                    threshold: bound,
                    avg: vs.avg,
                    min: vs.min,
                    max: vs.max,
                    fraction_crossing: c.fraction,
                };
                Signal {
                    vital,
                    severity,
                    direction,
                    description: describe(vital, severity, direction, &evidence),
                    evidence,
                }
            })
        })
}

fn mean_reaches_extreme(band: &Band, direction: Direction, avg: f64) -> bool {
    match direction {
        Direction::High => band.extreme_high.is_some_and(|b| avg >= b),
        Direction::Low => band.extreme_low.is_some_and(|b| avg <= b),
    }
}

fn describe(vital: Vital, severity: Severity, direction: Direction, e: &SignalEvidence) -> String {
    let (adjective, extremum, value, cmp) = match (severity, direction) {
        (Severity::Extreme, Direction::High) => ("elevated", "max", e.max, ">"),
        (Severity::Extreme, Direction::Low) => ("low", "min", e.min, "<"),
        (Severity::Mild, Direction::High) => ("mildly elevated", "max", e.max, ">"),
        (Severity::Mild, Direction::Low) => ("mildly low", "min", e.min, "<"),
    };
    let detected = if severity == Severity::Extreme { " detected" } else { "" };

    format!(
        "{adjective} {}{detected} (avg: {}, {extremum}: {}, {:.0}% of readings {cmp} {})",
        vital.label(),
        vital.format_value(e.avg),
        vital.format_value(value),
        e.fraction_crossing * 100.0,
        vital.format_bound(e.threshold),
    )
}

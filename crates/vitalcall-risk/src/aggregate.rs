use vitalcall_core::models::risk::{RiskLevel, Signal};

/// `high` if any signal is extreme, `moderate` if any is mild, else `low`.
pub fn risk_level(signals: &[Signal]) -> RiskLevel {
    signals
        .iter()
        .map(|s| RiskLevel::from(s.severity))
        .max()
        .unwrap_or(RiskLevel::Low)
}

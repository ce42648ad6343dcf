use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("no readings to assess")]
    NoReadings,

    #[error("invalid threshold table: {0}")]
    InvalidThresholds(String),

    #[error("threshold table parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

use serde::{Deserialize, Serialize};

use super::digest::VitalsDigest;
use super::risk::RiskResult;
use super::token_count::TokenUsage;

/// Input to a summary generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub patient_id: String,
    pub digest: VitalsDigest,
    pub risk: RiskResult,
}

/// A generated summary plus the usage it cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSummary {
    pub text: String,
    pub word_count: usize,
    pub model_id: String,
    pub usage: TokenUsage,
    pub generated_at: jiff::Timestamp,
}

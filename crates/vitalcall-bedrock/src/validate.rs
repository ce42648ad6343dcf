use crate::error::BedrockError;

pub const MIN_WORDS: usize = 50;
pub const MAX_WORDS: usize = 250;

const DIAGNOSTIC_PHRASES: &[&str] = &[
    "diagnosed with",
    "diagnosis of",
    "patient has",
    "patient is suffering",
    "condition is",
];

const TREATMENT_PHRASES: &[&str] = &[
    "recommend treatment",
    "prescribe",
    "administer",
    "should be given",
    "requires medication",
];

const TIME_KEYWORDS: &[&str] = &["hour", "time", "period", "window", "monitoring"];

const RISK_KEYWORDS: &[&str] = &["risk", "low", "moderate", "high", "normal", "concerning"];

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Check a generated summary before it is read to a provider.
///
/// Returns the word count on success.
pub fn validate_summary(text: &str, patient_id: &str) -> Result<usize, BedrockError> {
    let reject = |reason: String| -> Result<usize, BedrockError> {
        Err(BedrockError::Rejected(reason))
    };

    if text.trim().is_empty() {
        return reject("summary is empty".to_string());
    }

    let words = word_count(text);
    if words < MIN_WORDS {
        return reject(format!("too short ({words} words, minimum {MIN_WORDS})"));
    }
    if words > MAX_WORDS {
        return reject(format!("too long ({words} words, maximum {MAX_WORDS})"));
    }

    let lower = text.to_lowercase();
    if !lower.contains(&patient_id.to_lowercase()) {
        return reject(format!("does not reference patient {patient_id}"));
    }

    if let Some(phrase) = DIAGNOSTIC_PHRASES.iter().find(|p| lower.contains(*p)) {
        return reject(format!("contains diagnostic language: '{phrase}'"));
    }
    if let Some(phrase) = TREATMENT_PHRASES.iter().find(|p| lower.contains(*p)) {
        return reject(format!("contains treatment recommendation: '{phrase}'"));
    }

    if !TIME_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return reject("does not mention the time window".to_string());
    }
    if !RISK_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return reject("does not mention the risk assessment".to_string());
    }

    Ok(words)
}

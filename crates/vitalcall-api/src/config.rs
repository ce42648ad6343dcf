//! Startup configuration, resolved once from the environment.

use std::path::PathBuf;

use vitalcall_bedrock::summarize::DEFAULT_MODEL_ID;
use vitalcall_telephony::TwilioConfig;
use vitalcall_telephony::error::TelephonyError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// S3 bucket for readings and call records; in-memory storage when unset.
    pub bucket: Option<String>,
    /// JSON array of readings preloaded into the in-memory reading store.
    pub readings_file: Option<PathBuf>,
    /// JSON threshold table overriding the defaults.
    pub thresholds_file: Option<PathBuf>,
    pub model_id: String,
    pub region: Option<String>,
    /// `Err` names the first missing Twilio variable.
    pub twilio: Result<TwilioConfig, String>,
    /// Back a configured Twilio dispatcher with the stub.
    pub stub_fallback: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let twilio = TwilioConfig::from_lookup(&lookup).map_err(|e| match e {
            TelephonyError::Unconfigured(var) => var,
            other => other.to_string(),
        });

        Self {
            bind_addr: non_empty("VITALCALL_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            bucket: non_empty("VITALCALL_BUCKET"),
            readings_file: non_empty("VITALCALL_READINGS_FILE").map(PathBuf::from),
            thresholds_file: non_empty("VITALCALL_THRESHOLDS_FILE").map(PathBuf::from),
            model_id: non_empty("VITALCALL_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            region: non_empty("AWS_REGION"),
            twilio,
            stub_fallback: non_empty("VITALCALL_STUB_FALLBACK")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

use vitalcall_core::models::call::{CallStatus, StatusUpdate};

/// Map a Twilio call status onto the call lifecycle.
pub fn map_twilio_status(status: &str) -> CallStatus {
    match status {
        "queued" => CallStatus::Queued,
        "initiated" | "ringing" => CallStatus::Initiated,
        "in-progress" => CallStatus::InProgress,
        "completed" => CallStatus::Completed,
        "busy" | "no-answer" | "failed" | "canceled" => CallStatus::Failed,
        _ => CallStatus::Unknown,
    }
}

/// Twilio reports durations as decimal strings; anything unparsable is dropped.
pub fn parse_duration(duration: Option<&str>) -> Option<u64> {
    duration.and_then(|d| d.trim().parse().ok())
}

/// Build a status update from Twilio's `CallStatus` and `CallDuration` fields.
pub fn twilio_update(status: &str, duration: Option<&str>) -> StatusUpdate {
    StatusUpdate {
        status: map_twilio_status(status),
        duration_seconds: parse_duration(duration),
    }
}

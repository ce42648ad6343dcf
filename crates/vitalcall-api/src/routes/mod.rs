pub mod assess;
pub mod calls;
pub mod health;
pub mod twilio;
pub mod vitals;

use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_WINDOW_HOURS: u32 = 2;
pub const MAX_WINDOW_HOURS: u32 = 24;

/// `?hours=N` on window-based routes.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub hours: Option<u32>,
}

/// Resolve an optional window to `1..=24` hours, defaulting to 2.
pub fn window_hours(hours: Option<u32>) -> Result<u32, ApiError> {
    match hours.unwrap_or(DEFAULT_WINDOW_HOURS) {
        h @ 1..=MAX_WINDOW_HOURS => Ok(h),
        _ => Err(ApiError::BadRequest(format!(
            "hours must be between 1 and {MAX_WINDOW_HOURS}"
        ))),
    }
}

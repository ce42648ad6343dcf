use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::risk::RiskLevel;

/// Number of summary characters kept in a record's preview.
pub const PREVIEW_CHARS: usize = 150;

/// Lifecycle status of an outbound call.
///
/// Statuses only move forward. Ranks, lowest first: `queued`, `initiated`,
/// `unknown`, `in-progress`, then the terminal pair `completed` / `failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Queued,
    Initiated,
    /// The dispatcher could not resolve the call's status.
    Unknown,
    InProgress,
    Completed,
    Failed,
}

impl CallStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, CallStatus::Completed | CallStatus::Failed)
    }

    fn rank(self) -> u8 {
        match self {
            CallStatus::Queued => 0,
            CallStatus::Initiated => 1,
            CallStatus::Unknown => 2,
            CallStatus::InProgress => 3,
            CallStatus::Completed | CallStatus::Failed => 4,
        }
    }

    /// Whether moving from `self` to `next` is a forward transition.
    pub fn can_transition_to(self, next: CallStatus) -> bool {
        !self.is_terminal() && next.rank() > self.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallStatus::Queued => "queued",
            CallStatus::Initiated => "initiated",
            CallStatus::Unknown => "unknown",
            CallStatus::InProgress => "in-progress",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status report for a call, from a callback or a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: CallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
}

impl StatusUpdate {
    pub fn new(status: CallStatus) -> Self {
        Self {
            status,
            duration_seconds: None,
        }
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }
}

/// An asynchronous status event from a dispatcher, keyed by its handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub handle: String,
    pub update: StatusUpdate,
}

/// What happened when an update was offered to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    Applied { from: CallStatus, to: CallStatus },
    Ignored { current: CallStatus, requested: CallStatus },
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }
}

/// The orchestrator's audit/state object for one dispatched call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub call_id: String,
    pub patient_id: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    pub status: CallStatus,
    pub risk_level: RiskLevel,
    pub summary_preview: String,
    pub summary_text: String,
    /// Dispatcher handle; records only exist once dispatch succeeded.
    pub handle: String,
    /// Name of the dispatcher that placed the call.
    pub dispatcher: String,
    pub readings_analyzed: usize,
    pub completed_at: Option<jiff::Timestamp>,
    pub duration_seconds: Option<u64>,
}

impl CallRecord {
    /// Apply a status update if it moves the record forward.
    ///
    /// Ignored updates leave every field untouched, so replaying an update
    /// is a no-op.
    pub fn apply(&mut self, update: StatusUpdate, at: jiff::Timestamp) -> Transition {
        let from = self.status;
        if !from.can_transition_to(update.status) {
            return Transition::Ignored {
                current: from,
                requested: update.status,
            };
        }

        self.status = update.status;
        self.updated_at = at;
        if update.duration_seconds.is_some() {
            self.duration_seconds = update.duration_seconds;
        }
        if update.status.is_terminal() {
            self.completed_at = Some(at);
        }

        Transition::Applied {
            from,
            to: update.status,
        }
    }
}

/// Generate a fresh call id (`call_` + 32 hex digits).
pub fn new_call_id() -> String {
    format!("call_{}", Uuid::new_v4().simple())
}

/// First [`PREVIEW_CHARS`] characters of a summary, with `...` when cut.
pub fn summary_preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

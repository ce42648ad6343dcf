//! Collaborator contracts.
//!
//! The orchestrator depends only on these traits; concrete implementations
//! (S3, Bedrock, Twilio, in-memory, stub) are chosen at startup.

use std::future::Future;
use std::pin::Pin;

use crate::error::CollaboratorError;
use crate::models::call::{CallRecord, StatusUpdate, Transition};
use crate::models::reading::Reading;
use crate::models::summary::{GeneratedSummary, SummaryRequest};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of vital-sign readings.
pub trait ReadingStore: Send + Sync {
    /// Readings for `patient_id` taken within the last `window_hours`,
    /// oldest first. An empty vec is a valid answer, not an error.
    fn fetch<'a>(
        &'a self,
        patient_id: &'a str,
        window_hours: u32,
    ) -> BoxFuture<'a, Result<Vec<Reading>, CollaboratorError>>;
}

/// Result of applying a status update to a stored record.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub transition: Transition,
    /// The record after the update (unchanged when the update was ignored).
    pub record: CallRecord,
}

/// Keyed storage for call records.
///
/// Implementations must make [`CallRecordStore::apply`] atomic per call id:
/// two concurrent updates for the same record are serialized, and each one
/// is checked against the state left by the other.
pub trait CallRecordStore: Send + Sync {
    /// Insert a new record. Fails if the call id is already taken.
    fn insert(&self, record: CallRecord) -> BoxFuture<'_, Result<(), CollaboratorError>>;

    fn get<'a>(
        &'a self,
        call_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<CallRecord>, CollaboratorError>>;

    /// Resolve a dispatcher handle to the call id it belongs to.
    fn find_by_handle<'a>(
        &'a self,
        handle: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>, CollaboratorError>>;

    /// Apply a status update. `None` when the call id is unknown.
    fn apply<'a>(
        &'a self,
        call_id: &'a str,
        update: StatusUpdate,
    ) -> BoxFuture<'a, Result<Option<UpdateOutcome>, CollaboratorError>>;
}

/// Natural-language summary generation.
pub trait SummaryGenerator: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: &'a SummaryRequest,
    ) -> BoxFuture<'a, Result<GeneratedSummary, CollaboratorError>>;
}

/// What the dispatcher needs to place a call.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub call_id: String,
    pub patient_id: String,
    pub summary_text: String,
}

/// Returned by a successful dispatch.
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    /// Opaque dispatcher handle (e.g. a Twilio call SID).
    pub handle: String,
    /// A status the dispatcher already knows at dispatch time, if any.
    pub reported: Option<StatusUpdate>,
}

/// Outbound voice call placement.
pub trait Dispatcher: Send + Sync {
    /// Short name recorded on each call record (`twilio`, `stub`).
    fn name(&self) -> &str;

    fn dispatch<'a>(
        &'a self,
        request: &'a DispatchRequest,
    ) -> BoxFuture<'a, Result<DispatchReceipt, CollaboratorError>>;

    /// Ask the dispatcher for the current status of a call it placed.
    fn fetch_status<'a>(
        &'a self,
        handle: &'a str,
    ) -> BoxFuture<'a, Result<StatusUpdate, CollaboratorError>>;
}

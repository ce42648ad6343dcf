use tracing::info;
use uuid::Uuid;
use vitalcall_core::models::call::{CallStatus, StatusUpdate};
use vitalcall_core::ports::{DispatchReceipt, DispatchRequest, Dispatcher};
use vitalcall_core::{BoxFuture, CollaboratorError};

/// Duration reported for every stub call.
pub const STUB_CALL_SECONDS: u64 = 120;

/// Stand-in dispatcher that never contacts a telephony service.
///
/// Every call "completes" immediately, so the full pipeline can run in
/// tests and demos without Twilio credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubDispatcher;

impl StubDispatcher {
    pub fn new() -> Self {
        Self
    }

    fn completed() -> StatusUpdate {
        StatusUpdate::new(CallStatus::Completed).with_duration(STUB_CALL_SECONDS)
    }
}

impl Dispatcher for StubDispatcher {
    fn name(&self) -> &str {
        "stub"
    }

    fn dispatch<'a>(
        &'a self,
        request: &'a DispatchRequest,
    ) -> BoxFuture<'a, Result<DispatchReceipt, CollaboratorError>> {
        Box::pin(async move {
            let handle = format!("stub_{}", Uuid::new_v4().simple());
            info!(
                call_id = %request.call_id,
                patient_id = %request.patient_id,
                handle = %handle,
                "stub call placed"
            );
            Ok(DispatchReceipt {
                handle,
                reported: Some(Self::completed()),
            })
        })
    }

    fn fetch_status<'a>(
        &'a self,
        _handle: &'a str,
    ) -> BoxFuture<'a, Result<StatusUpdate, CollaboratorError>> {
        Box::pin(async move { Ok(Self::completed()) })
    }
}

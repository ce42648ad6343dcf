use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use vitalcall_orchestrator::OrchestrationError;
use vitalcall_risk::error::RiskError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// An upstream collaborator (model or telephony) failed.
    BadGateway(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::BadGateway(msg) => {
                tracing::warn!("upstream failure: {msg}");
                (StatusCode::BAD_GATEWAY, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<OrchestrationError> for ApiError {
    fn from(e: OrchestrationError) -> Self {
        match e {
            OrchestrationError::NoData { .. } | OrchestrationError::NotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            OrchestrationError::Summary { .. } | OrchestrationError::Dispatch(_) => {
                ApiError::BadGateway(e.to_string())
            }
            OrchestrationError::ReadingStore(_)
            | OrchestrationError::RecordStore(_)
            | OrchestrationError::Risk(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<RiskError> for ApiError {
    fn from(e: RiskError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

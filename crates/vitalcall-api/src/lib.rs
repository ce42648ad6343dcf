//! vitalcall-api
//!
//! HTTP surface over the call orchestrator, plus the Twilio webhooks.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Readings and risk
        .route(
            "/patients/{patient_id}/vitals/recent",
            get(routes::vitals::recent_vitals),
        )
        .route(
            "/patients/{patient_id}/assess",
            post(routes::assess::assess_patient),
        )
        .route("/assess", post(routes::assess::assess_readings))
        // Calls
        .route("/call-doctor", post(routes::calls::call_doctor))
        .route("/calls/{call_id}/status", get(routes::calls::call_status))
        // Twilio webhooks
        .route("/twilio/voice", post(routes::twilio::voice))
        .route("/twilio/status", post(routes::twilio::status_callback))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

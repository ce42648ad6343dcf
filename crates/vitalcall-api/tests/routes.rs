use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use jiff::{SignedDuration, Timestamp};
use serde_json::{Value, json};
use tower::ServiceExt;
use vitalcall_api::router;
use vitalcall_api::state::AppState;
use vitalcall_core::models::call::StatusUpdate;
use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::summary::{GeneratedSummary, SummaryRequest};
use vitalcall_core::models::token_count::TokenUsage;
use vitalcall_core::ports::{DispatchReceipt, DispatchRequest, Dispatcher, SummaryGenerator};
use vitalcall_core::{BoxFuture, CollaboratorError, FailureKind};
use vitalcall_orchestrator::{Orchestrator, RetryPolicy};
use vitalcall_storage::calls::InMemoryCallRecordStore;
use vitalcall_storage::readings::InMemoryReadingStore;
use vitalcall_telephony::StubDispatcher;

// ── Fakes ──────────────────────────────────────────────────────

struct FixedSummarizer {
    fail_with: Option<FailureKind>,
}

impl SummaryGenerator for FixedSummarizer {
    fn generate<'a>(
        &'a self,
        request: &'a SummaryRequest,
    ) -> BoxFuture<'a, Result<GeneratedSummary, CollaboratorError>> {
        Box::pin(async move {
            if let Some(kind) = self.fail_with {
                return Err(CollaboratorError::new(kind, "model access denied"));
            }
            let text = format!(
                "Monitoring of patient {} shows {} risk & a stable trend.",
                request.patient_id, request.risk.risk_level
            );
            Ok(GeneratedSummary {
                word_count: text.split_whitespace().count(),
                text,
                model_id: "fixed".to_string(),
                usage: TokenUsage::default(),
                generated_at: Timestamp::now(),
            })
        })
    }
}

/// Hands out sequential `CA` handles and never reports a status itself.
#[derive(Default)]
struct FakeTwilio {
    placed: AtomicU32,
}

impl Dispatcher for FakeTwilio {
    fn name(&self) -> &str {
        "twilio"
    }

    fn dispatch<'a>(
        &'a self,
        _request: &'a DispatchRequest,
    ) -> BoxFuture<'a, Result<DispatchReceipt, CollaboratorError>> {
        Box::pin(async move {
            let n = self.placed.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(DispatchReceipt {
                handle: format!("CA{n}"),
                reported: None,
            })
        })
    }

    fn fetch_status<'a>(
        &'a self,
        _handle: &'a str,
    ) -> BoxFuture<'a, Result<StatusUpdate, CollaboratorError>> {
        Box::pin(async move {
            Err(CollaboratorError::new(
                FailureKind::ServiceUnavailable,
                "poll disabled",
            ))
        })
    }
}

// ── Fixtures ───────────────────────────────────────────────────

fn reading(patient_id: &str, minutes_ago: i64, heart_rate: f64, spo2: f64) -> Reading {
    Reading {
        patient_id: patient_id.to_string(),
        timestamp: Timestamp::now() - SignedDuration::from_mins(minutes_ago),
        heart_rate,
        respiratory_rate: 16.0,
        body_temperature: 36.8,
        spo2,
        systolic_bp: 118,
        diastolic_bp: 76,
        age: 64,
        gender: "F".to_string(),
    }
}

fn seeded_readings() -> Vec<Reading> {
    let mut readings = Vec::new();
    for i in 0..20 {
        readings.push(reading("HIGH_001", 1 + 5 * i, 135.0, 88.0));
        readings.push(reading("NORMAL_001", 1 + 5 * i, 72.0, 98.0));
    }
    // Outside the default 2-hour window.
    readings.push(reading("OLD_001", 300, 72.0, 98.0));
    readings
}

fn app_with(summarizer: FixedSummarizer, dispatcher: Arc<dyn Dispatcher>) -> Router {
    let orchestrator = Orchestrator::new(
        Arc::new(InMemoryReadingStore::from_readings(seeded_readings())),
        Arc::new(InMemoryCallRecordStore::new()),
        Arc::new(summarizer),
        dispatcher,
    )
    .with_retry_policy(RetryPolicy::immediate(3));
    router(AppState::new(orchestrator))
}

fn app() -> Router {
    app_with(FixedSummarizer { fail_with: None }, Arc::new(StubDispatcher::new()))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>, Option<String>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, body, content_type)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body, _) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body, _) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, String, Option<String>) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let (status, body, content_type) = send(app, req).await;
    (status, String::from_utf8(body).unwrap(), content_type)
}

// ── Health and readings ────────────────────────────────────────

#[tokio::test]
async fn health_reports_service() {
    let (status, body) = get_json(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "vitalcall");
}

#[tokio::test]
async fn recent_vitals_defaults_to_two_hours() {
    let (status, body) = get_json(&app(), "/patients/NORMAL_001/vitals/recent").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["window_hours"], 2);
    assert_eq!(body["count"], 20);
    assert_eq!(body["readings"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn recent_vitals_outside_window_is_not_found() {
    let app = app();
    let (status, body) = get_json(&app, "/patients/OLD_001/vitals/recent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("OLD_001"));

    let (status, body) = get_json(&app, "/patients/OLD_001/vitals/recent?hours=6").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn window_hours_must_be_in_range() {
    let app = app();
    for uri in [
        "/patients/NORMAL_001/vitals/recent?hours=0",
        "/patients/NORMAL_001/vitals/recent?hours=25",
    ] {
        let (status, _) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

// ── Assessment ─────────────────────────────────────────────────

#[tokio::test]
async fn assess_stored_patient() {
    let (status, body) = post_json(&app(), "/patients/HIGH_001/assess?hours=2", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"]["risk_level"], "high");
    assert_eq!(body["risk"]["signals"].as_array().unwrap().len(), 2);
    assert_eq!(body["readings_analyzed"], 20);
}

#[tokio::test]
async fn assess_posted_readings() {
    let readings: Vec<Reading> = (0..10).map(|i| reading("ADHOC", i, 72.0, 98.0)).collect();
    let (status, body) = post_json(&app(), "/assess", json!({ "readings": readings })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_level"], "low");
    assert!(body["signals"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn assess_with_no_readings_is_bad_request() {
    let (status, body) = post_json(&app(), "/assess", json!({ "readings": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no readings to assess");
}

// ── Calls ──────────────────────────────────────────────────────

#[tokio::test]
async fn call_doctor_via_stub_completes() {
    let app = app();
    let (status, body) =
        post_json(&app, "/call-doctor", json!({ "patient_id": "HIGH_001" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["dispatcher"], "stub");
    assert_eq!(body["readings_analyzed"], 20);
    assert!(body.get("summary_text").is_none());

    let call_id = body["call_id"].as_str().unwrap();
    let (status, snapshot) = get_json(&app, &format!("/calls/{call_id}/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["call_id"], call_id);
    assert_eq!(snapshot["status"], "completed");
    assert_eq!(snapshot["duration_seconds"], 120);
}

#[tokio::test]
async fn call_doctor_validates_input() {
    let app = app();
    let (status, _) = post_json(&app, "/call-doctor", json!({ "patient_id": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/call-doctor",
        json!({ "patient_id": "HIGH_001", "hours": 48 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn call_doctor_without_readings_is_not_found() {
    let (status, body) =
        post_json(&app(), "/call-doctor", json!({ "patient_id": "NOBODY" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("NOBODY"));
}

#[tokio::test]
async fn summary_failure_is_bad_gateway() {
    let app = app_with(
        FixedSummarizer {
            fail_with: Some(FailureKind::AuthenticationFailed),
        },
        Arc::new(StubDispatcher::new()),
    );
    let (status, body) =
        post_json(&app, "/call-doctor", json!({ "patient_id": "HIGH_001" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("summary generation failed"));
}

#[tokio::test]
async fn unknown_call_status_is_not_found() {
    let (status, _) = get_json(&app(), "/calls/call_nope/status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_refresh_returns_stored_record() {
    let app = app_with(FixedSummarizer { fail_with: None }, Arc::new(FakeTwilio::default()));
    let (_, body) = post_json(&app, "/call-doctor", json!({ "patient_id": "NORMAL_001" })).await;
    let call_id = body["call_id"].as_str().unwrap();

    let (status, snapshot) =
        get_json(&app, &format!("/calls/{call_id}/status?refresh=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["status"], "initiated");
}

// ── Twilio webhooks ────────────────────────────────────────────

#[tokio::test]
async fn voice_webhook_reads_summary() {
    let app = app();
    let (_, body) = post_json(&app, "/call-doctor", json!({ "patient_id": "HIGH_001" })).await;
    let call_id = body["call_id"].as_str().unwrap();

    let (status, xml, content_type) =
        post_form(&app, &format!("/twilio/voice?call_id={call_id}"), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/xml"));
    assert!(xml.contains("not a diagnosis"));
    assert!(xml.contains("Monitoring of patient HIGH_001 shows high risk &amp; a stable trend."));
}

#[tokio::test]
async fn voice_webhook_speaks_errors() {
    let app = app();

    let (status, xml, _) = post_form(&app, "/twilio/voice", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("missing call identifier"));

    let (status, xml, _) = post_form(&app, "/twilio/voice?call_id=call_nope", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("call data not found"));
}

#[tokio::test]
async fn status_callbacks_drive_the_record() {
    let app = app_with(FixedSummarizer { fail_with: None }, Arc::new(FakeTwilio::default()));
    let (_, body) = post_json(&app, "/call-doctor", json!({ "patient_id": "HIGH_001" })).await;
    assert_eq!(body["status"], "initiated");
    let call_id = body["call_id"].as_str().unwrap().to_string();

    let (status, _, _) = post_form(
        &app,
        "/twilio/status",
        "CallSid=CA1&CallStatus=in-progress",
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = post_form(
        &app,
        "/twilio/status",
        "CallSid=CA1&CallStatus=completed&CallDuration=47",
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Late, out-of-order callback is accepted but ignored.
    let (status, _, _) = post_form(&app, "/twilio/status", "CallSid=CA1&CallStatus=ringing").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, snapshot) = get_json(&app, &format!("/calls/{call_id}/status")).await;
    assert_eq!(snapshot["status"], "completed");
    assert_eq!(snapshot["duration_seconds"], 47);
    assert!(!snapshot["completed_at"].is_null());
}

#[tokio::test]
async fn status_callback_for_unknown_call_is_not_found() {
    let (status, _, _) = post_form(
        &app(),
        "/twilio/status",
        "CallSid=CA999&CallStatus=completed",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

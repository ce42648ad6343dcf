use serde_json::json;
use vitalcall_audit::events::{AuditEvent, Subject};

#[test]
fn call_event_serializes_without_empty_details() {
    let event = AuditEvent::call("call_dispatched", "call_abc", "orchestrator");
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value["action"], "call_dispatched");
    assert_eq!(value["subject"], "call");
    assert_eq!(value["subject_id"], "call_abc");
    assert_eq!(value["actor"], "orchestrator");
    assert!(value.get("details").is_none());
    assert!(value["recorded_at"].is_string());
}

#[test]
fn patient_event_carries_details() {
    let event = AuditEvent::patient("orchestration_failed", "PATIENT_001", "orchestrator")
        .with_details(json!({ "class": "no_data" }));

    assert_eq!(event.subject, Subject::Patient);
    assert_eq!(event.details, Some(json!({ "class": "no_data" })));

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["details"]["class"], "no_data");
}

#[test]
fn subject_names_match_serialized_form() {
    for subject in [Subject::Call, Subject::Patient, Subject::DispatcherCall] {
        let serialized = serde_json::to_value(subject).unwrap();
        assert_eq!(serialized, subject.as_str());
    }
}

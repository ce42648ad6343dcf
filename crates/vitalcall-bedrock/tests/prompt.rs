use vitalcall_bedrock::prompt::{SYSTEM_PROMPT, build_user_prompt};
use vitalcall_core::models::reading::Reading;
use vitalcall_core::models::summary::SummaryRequest;
use vitalcall_risk::thresholds::Thresholds;
use vitalcall_risk::{assess, digest};

fn readings(heart_rate: f64, spo2: f64) -> Vec<Reading> {
    (0..24)
        .map(|i| Reading {
            patient_id: "PATIENT_007".to_string(),
            timestamp: jiff::Timestamp::from_second(1_700_000_000 + i * 300).unwrap(),
            heart_rate,
            respiratory_rate: 16.0,
            body_temperature: 36.8,
            spo2,
            systolic_bp: 122,
            diastolic_bp: 78,
            age: 67,
            gender: "female".to_string(),
        })
        .collect()
}

fn request(heart_rate: f64, spo2: f64) -> SummaryRequest {
    let window = readings(heart_rate, spo2);
    SummaryRequest {
        patient_id: "PATIENT_007".to_string(),
        digest: digest::digest(&window, 2).unwrap(),
        risk: assess(&window, &Thresholds::default()).unwrap(),
    }
}

#[test]
fn system_prompt_forbids_diagnosis_and_treatment() {
    assert!(SYSTEM_PROMPT.contains("must NOT provide diagnoses"));
    assert!(SYSTEM_PROMPT.contains("must NOT recommend treatments"));
}

#[test]
fn user_prompt_carries_window_stats_and_context() {
    let prompt = build_user_prompt(&request(72.0, 98.0));

    assert!(prompt.contains("patient PATIENT_007"));
    assert!(prompt.contains("last 2 hours"));
    assert!(prompt.contains("Total readings: 24"));
    assert!(prompt.contains("- heart rate: avg 72.0 bpm"));
    assert!(prompt.contains("- oxygen saturation: avg 98.0%"));
    assert!(prompt.contains("- systolic blood pressure: avg 122 mmhg"));
    assert!(prompt.contains("Overall trend: stable"));
    assert!(prompt.contains("Risk assessment: low"));
    assert!(prompt.contains("67 year old female"));
    assert!(!prompt.contains("Concerning patterns detected"));
}

#[test]
fn user_prompt_lists_signal_descriptions() {
    let req = request(135.0, 88.0);
    let prompt = build_user_prompt(&req);

    assert!(prompt.contains("Risk assessment: high"));
    assert!(prompt.contains("Concerning patterns detected:"));
    for signal in &req.risk.signals {
        assert!(prompt.contains(&signal.description));
    }
}

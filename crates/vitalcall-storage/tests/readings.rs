use jiff::{SignedDuration, Timestamp};
use vitalcall_core::models::reading::Reading;
use vitalcall_core::ports::ReadingStore;
use vitalcall_storage::readings::{InMemoryReadingStore, select_window};

fn reading(patient_id: &str, timestamp: Timestamp, heart_rate: f64) -> Reading {
    Reading {
        patient_id: patient_id.to_string(),
        timestamp,
        heart_rate,
        respiratory_rate: 16.0,
        body_temperature: 36.8,
        spo2: 98.0,
        systolic_bp: 120,
        diastolic_bp: 80,
        age: 60,
        gender: "F".to_string(),
    }
}

fn minutes_ago(now: Timestamp, minutes: i64) -> Timestamp {
    now - SignedDuration::from_mins(minutes)
}

#[test]
fn select_window_keeps_only_recent_readings_oldest_first() {
    let now = Timestamp::from_second(1_700_000_000).unwrap();
    let readings = vec![
        reading("P1", minutes_ago(now, 10), 80.0),
        reading("P1", minutes_ago(now, 200), 81.0),
        reading("P1", minutes_ago(now, 90), 82.0),
        reading("P1", minutes_ago(now, 30), 83.0),
    ];

    let selected = select_window(readings, now, 2);

    let rates: Vec<f64> = selected.iter().map(|r| r.heart_rate).collect();
    assert_eq!(rates, vec![82.0, 83.0, 80.0]);
}

#[test]
fn select_window_includes_both_edges_and_drops_future_readings() {
    let now = Timestamp::from_second(1_700_000_000).unwrap();
    let readings = vec![
        reading("P1", minutes_ago(now, 60), 70.0),
        reading("P1", now, 71.0),
        reading("P1", now + SignedDuration::from_mins(1), 72.0),
    ];

    let selected = select_window(readings, now, 1);

    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].heart_rate, 70.0);
    assert_eq!(selected[1].heart_rate, 71.0);
}

#[test]
fn select_window_saturates_for_huge_windows() {
    let now = Timestamp::from_second(1_700_000_000).unwrap();
    let readings = vec![
        reading("P1", Timestamp::MIN, 60.0),
        reading("P1", minutes_ago(now, 5), 61.0),
    ];

    let selected = select_window(readings, now, u32::MAX);

    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].heart_rate, 60.0);
}

#[tokio::test]
async fn fetch_with_max_window_returns_all_past_readings() {
    let now = Timestamp::now();
    let store = InMemoryReadingStore::from_readings(vec![
        reading("P1", minutes_ago(now, 5), 90.0),
        reading("P1", Timestamp::from_second(0).unwrap(), 91.0),
    ]);

    let readings = store.fetch("P1", u32::MAX).await.unwrap();

    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].heart_rate, 91.0);
}

#[tokio::test]
async fn fetch_returns_only_the_requested_patient() {
    let now = Timestamp::now();
    let store = InMemoryReadingStore::from_readings(vec![
        reading("P1", minutes_ago(now, 5), 90.0),
        reading("P2", minutes_ago(now, 5), 100.0),
        reading("P1", minutes_ago(now, 15), 91.0),
    ]);

    let readings = store.fetch("P1", 2).await.unwrap();

    assert_eq!(readings.len(), 2);
    assert!(readings.iter().all(|r| r.patient_id == "P1"));
    assert_eq!(readings[0].heart_rate, 91.0);
}

#[tokio::test]
async fn unknown_patient_yields_empty_window() {
    let store = InMemoryReadingStore::new();
    let readings = store.fetch("NOBODY", 24).await.unwrap();
    assert!(readings.is_empty());
}

#[tokio::test]
async fn inserted_readings_become_visible() {
    let store = InMemoryReadingStore::new();
    store
        .insert(reading("P9", minutes_ago(Timestamp::now(), 1), 77.0))
        .await;

    assert_eq!(store.patient_count().await, 1);
    assert_eq!(store.fetch("P9", 1).await.unwrap().len(), 1);
}

#[test]
fn from_json_parses_an_array_of_readings() {
    let json = br#"[{
        "patient_id": "P1",
        "timestamp": "2024-01-01T10:00:00Z",
        "heart_rate": 72.0,
        "respiratory_rate": 14.0,
        "body_temperature": 36.6,
        "spo2": 97.5,
        "systolic_bp": 118,
        "diastolic_bp": 76,
        "age": 51,
        "gender": "M"
    }]"#;

    assert!(InMemoryReadingStore::from_json(json).is_ok());
    assert!(InMemoryReadingStore::from_json(b"{not json").is_err());
}

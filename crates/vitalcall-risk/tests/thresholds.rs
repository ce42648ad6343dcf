use vitalcall_risk::error::RiskError;
use vitalcall_risk::thresholds::{Thresholds, SUSTAINED_FRACTION};

#[test]
fn default_table_is_valid() {
    let t = Thresholds::default();
    t.validate().unwrap();
    assert_eq!(t.sustained_fraction, SUSTAINED_FRACTION);
    assert_eq!(t.heart_rate.extreme_high, Some(120.0));
    assert_eq!(t.spo2.normal_high, None);
}

#[test]
fn partial_json_keeps_defaults_for_omitted_vitals() {
    let json = r#"{
        "heart_rate": {
            "normal_low": 55.0,
            "normal_high": 105.0,
            "extreme_low": 45.0,
            "extreme_high": 130.0
        },
        "sustained_fraction": 0.5
    }"#;
    let t = Thresholds::from_json(json).unwrap();

    assert_eq!(t.heart_rate.extreme_high, Some(130.0));
    assert_eq!(t.sustained_fraction, 0.5);
    assert_eq!(t.temperature, Thresholds::default().temperature);
}

#[test]
fn extreme_bound_inside_normal_band_is_rejected() {
    let json = r#"{
        "temperature": {
            "normal_low": 36.1,
            "normal_high": 37.2,
            "extreme_low": 35.5,
            "extreme_high": 37.0
        }
    }"#;
    assert!(matches!(
        Thresholds::from_json(json),
        Err(RiskError::InvalidThresholds(_))
    ));
}

#[test]
fn sustained_fraction_must_be_positive() {
    let t = Thresholds {
        sustained_fraction: 0.0,
        ..Thresholds::default()
    };
    assert!(matches!(t.validate(), Err(RiskError::InvalidThresholds(_))));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        Thresholds::from_json("{ not json"),
        Err(RiskError::Parse(_))
    ));
}

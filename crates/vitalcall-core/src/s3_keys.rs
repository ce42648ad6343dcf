//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the VitalCall S3 bucket.

pub fn patient_readings(patient_id: &str) -> String {
    format!("patients/{patient_id}/readings.json")
}

pub fn call_record(call_id: &str) -> String {
    format!("calls/{call_id}.json")
}

pub fn call_handle(handle: &str) -> String {
    format!("calls/_by_handle/{handle}.json")
}

use std::collections::HashMap;

use aws_sdk_s3::Client;
use jiff::{SignedDuration, Timestamp};
use tokio::sync::RwLock;
use tracing::debug;
use vitalcall_core::models::reading::Reading;
use vitalcall_core::ports::ReadingStore;
use vitalcall_core::{BoxFuture, CollaboratorError, s3_keys};

use crate::error::StorageError;
use crate::state;

/// Keep the readings taken in `[now - window_hours, now]`, oldest first.
///
/// A window reaching past the earliest representable instant starts there.
pub fn select_window(mut readings: Vec<Reading>, now: Timestamp, window_hours: u32) -> Vec<Reading> {
    let start = now
        .checked_sub(SignedDuration::from_hours(i64::from(window_hours)))
        .unwrap_or(Timestamp::MIN);
    readings.retain(|r| r.timestamp >= start && r.timestamp <= now);
    readings.sort_by_key(|r| r.timestamp);
    readings
}

/// Readings held in process memory, grouped by patient.
#[derive(Default)]
pub struct InMemoryReadingStore {
    by_patient: RwLock<HashMap<String, Vec<Reading>>>,
}

impl InMemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_readings(readings: impl IntoIterator<Item = Reading>) -> Self {
        let mut by_patient: HashMap<String, Vec<Reading>> = HashMap::new();
        for reading in readings {
            by_patient
                .entry(reading.patient_id.clone())
                .or_default()
                .push(reading);
        }
        Self {
            by_patient: RwLock::new(by_patient),
        }
    }

    /// Parse a JSON array of readings.
    pub fn from_json(bytes: &[u8]) -> Result<Self, StorageError> {
        let readings: Vec<Reading> = serde_json::from_slice(bytes)?;
        Ok(Self::from_readings(readings))
    }

    pub async fn insert(&self, reading: Reading) {
        self.by_patient
            .write()
            .await
            .entry(reading.patient_id.clone())
            .or_default()
            .push(reading);
    }

    pub async fn patient_count(&self) -> usize {
        self.by_patient.read().await.len()
    }
}

impl ReadingStore for InMemoryReadingStore {
    fn fetch<'a>(
        &'a self,
        patient_id: &'a str,
        window_hours: u32,
    ) -> BoxFuture<'a, Result<Vec<Reading>, CollaboratorError>> {
        Box::pin(async move {
            let all = self
                .by_patient
                .read()
                .await
                .get(patient_id)
                .cloned()
                .unwrap_or_default();
            Ok(select_window(all, Timestamp::now(), window_hours))
        })
    }
}

/// Readings stored as one JSON array per patient under
/// `patients/{id}/readings.json`.
pub struct S3ReadingStore {
    client: Client,
    bucket: String,
}

impl S3ReadingStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Replace a patient's stored readings.
    pub async fn store(&self, patient_id: &str, readings: &[Reading]) -> Result<(), StorageError> {
        let key = s3_keys::patient_readings(patient_id);
        state::save_state(&self.client, &self.bucket, &key, &readings).await?;
        Ok(())
    }
}

impl ReadingStore for S3ReadingStore {
    fn fetch<'a>(
        &'a self,
        patient_id: &'a str,
        window_hours: u32,
    ) -> BoxFuture<'a, Result<Vec<Reading>, CollaboratorError>> {
        Box::pin(async move {
            let key = s3_keys::patient_readings(patient_id);
            let all = match state::load_state_opt::<Vec<Reading>>(&self.client, &self.bucket, &key)
                .await?
            {
                Some((readings, _etag)) => readings,
                None => {
                    debug!(patient_id, "no readings object for patient");
                    Vec::new()
                }
            };
            Ok(select_window(all, Timestamp::now(), window_hours))
        })
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use aws_sdk_s3::Client;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use vitalcall_core::models::call::{CallRecord, StatusUpdate};
use vitalcall_core::ports::{CallRecordStore, UpdateOutcome};
use vitalcall_core::{BoxFuture, CollaboratorError, FailureKind, s3_keys};

use crate::error::StorageError;
use crate::state;

/// Call records held in process memory.
///
/// Each record sits behind its own mutex so updates to one call never wait
/// on another.
#[derive(Default)]
pub struct InMemoryCallRecordStore {
    records: RwLock<HashMap<String, Arc<Mutex<CallRecord>>>>,
    handles: RwLock<HashMap<String, String>>,
}

impl InMemoryCallRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, call_id: &str) -> Option<Arc<Mutex<CallRecord>>> {
        self.records.read().await.get(call_id).cloned()
    }
}

impl CallRecordStore for InMemoryCallRecordStore {
    fn insert(&self, record: CallRecord) -> BoxFuture<'_, Result<(), CollaboratorError>> {
        Box::pin(async move {
            let mut records = self.records.write().await;
            if records.contains_key(&record.call_id) {
                return Err(CollaboratorError::new(
                    FailureKind::InvalidRequest,
                    format!("call id already exists: {}", record.call_id),
                ));
            }
            self.handles
                .write()
                .await
                .insert(record.handle.clone(), record.call_id.clone());
            records.insert(record.call_id.clone(), Arc::new(Mutex::new(record)));
            Ok(())
        })
    }

    fn get<'a>(
        &'a self,
        call_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<CallRecord>, CollaboratorError>> {
        Box::pin(async move {
            let Some(slot) = self.slot(call_id).await else {
                return Ok(None);
            };
            let record = slot.lock().await.clone();
            Ok(Some(record))
        })
    }

    fn find_by_handle<'a>(
        &'a self,
        handle: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>, CollaboratorError>> {
        Box::pin(async move { Ok(self.handles.read().await.get(handle).cloned()) })
    }

    fn apply<'a>(
        &'a self,
        call_id: &'a str,
        update: StatusUpdate,
    ) -> BoxFuture<'a, Result<Option<UpdateOutcome>, CollaboratorError>> {
        Box::pin(async move {
            let Some(slot) = self.slot(call_id).await else {
                return Ok(None);
            };
            let mut record = slot.lock().await;
            let transition = record.apply(update, Timestamp::now());
            Ok(Some(UpdateOutcome {
                transition,
                record: record.clone(),
            }))
        })
    }
}

/// Handle index entry stored at `calls/_by_handle/{handle}.json`.
#[derive(Debug, Serialize, Deserialize)]
struct HandleIndex {
    call_id: String,
}

/// Default number of read-modify-write attempts for [`S3CallRecordStore::apply`].
pub const DEFAULT_UPDATE_ATTEMPTS: usize = 5;

/// Call records stored as JSON documents in S3.
///
/// Updates use ETag optimistic locking: the record is re-read and the
/// transition re-checked whenever another writer got there first.
pub struct S3CallRecordStore {
    client: Client,
    bucket: String,
    update_attempts: usize,
}

impl S3CallRecordStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            update_attempts: DEFAULT_UPDATE_ATTEMPTS,
        }
    }

    pub fn with_update_attempts(mut self, attempts: usize) -> Self {
        self.update_attempts = attempts.max(1);
        self
    }

    async fn apply_with_retry(
        &self,
        call_id: &str,
        update: StatusUpdate,
    ) -> Result<Option<UpdateOutcome>, StorageError> {
        let key = s3_keys::call_record(call_id);

        for attempt in 1..=self.update_attempts {
            let Some((mut record, etag)) =
                state::load_state_opt::<CallRecord>(&self.client, &self.bucket, &key).await?
            else {
                return Ok(None);
            };

            let transition = record.apply(update, Timestamp::now());
            if !transition.is_applied() {
                return Ok(Some(UpdateOutcome { transition, record }));
            }

            match state::save_state_if_match(&self.client, &self.bucket, &key, &record, &etag)
                .await
            {
                Ok(_) => return Ok(Some(UpdateOutcome { transition, record })),
                Err(StorageError::PreconditionFailed { .. }) => {
                    debug!(call_id, attempt, "call record changed underneath update, re-reading");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(call_id, attempts = self.update_attempts, "call record update kept conflicting");
        Err(StorageError::Conflict {
            key,
            attempts: self.update_attempts,
        })
    }
}

impl CallRecordStore for S3CallRecordStore {
    fn insert(&self, record: CallRecord) -> BoxFuture<'_, Result<(), CollaboratorError>> {
        Box::pin(async move {
            // Index before record; an index without a record resolves to
            // nothing and is tolerated by `find_by_handle` callers.
            let index = HandleIndex {
                call_id: record.call_id.clone(),
            };
            let index_key = s3_keys::call_handle(&record.handle);
            state::save_state(&self.client, &self.bucket, &index_key, &index).await?;

            let key = s3_keys::call_record(&record.call_id);
            state::create_state(&self.client, &self.bucket, &key, &record).await?;
            Ok(())
        })
    }

    fn get<'a>(
        &'a self,
        call_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<CallRecord>, CollaboratorError>> {
        Box::pin(async move {
            let key = s3_keys::call_record(call_id);
            let found = state::load_state_opt::<CallRecord>(&self.client, &self.bucket, &key).await?;
            Ok(found.map(|(record, _etag)| record))
        })
    }

    fn find_by_handle<'a>(
        &'a self,
        handle: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>, CollaboratorError>> {
        Box::pin(async move {
            let key = s3_keys::call_handle(handle);
            let found = state::load_state_opt::<HandleIndex>(&self.client, &self.bucket, &key).await?;
            Ok(found.map(|(index, _etag)| index.call_id))
        })
    }

    fn apply<'a>(
        &'a self,
        call_id: &'a str,
        update: StatusUpdate,
    ) -> BoxFuture<'a, Result<Option<UpdateOutcome>, CollaboratorError>> {
        Box::pin(async move { Ok(self.apply_with_retry(call_id, update).await?) })
    }
}

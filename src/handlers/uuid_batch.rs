//! Scheduled job that writes a batch of random ids to the object store.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::objects::ObjectStore;
use crate::store::StoreError;

pub const BATCH_SIZE: usize = 10;

#[derive(Debug, Serialize)]
pub struct UuidBatch {
    pub ids: Vec<String>,
}

impl UuidBatch {
    pub fn generate(count: usize) -> Self {
        Self { ids: (0..count).map(|_| Uuid::new_v4().to_string()).collect() }
    }
}

/// Object key for a batch written at `at`, e.g. `2024-05-01T10:00:00.000Z`.
pub fn object_key(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate a batch and upload it as pretty-printed JSON. Returns the object key.
pub async fn handle_uuid_batch<O: ObjectStore>(objects: &O, bucket: &str, at: DateTime<Utc>) -> Result<String, StoreError> {
    let batch = UuidBatch::generate(BATCH_SIZE);
    let bytes = serde_json::to_vec_pretty(&batch).map_err(|e| StoreError::Conversion(e.to_string()))?;
    let key = object_key(at);

    objects.put_object(bucket, &key, bytes, "application/json").await?;
    info!(bucket, key = %key, count = batch.ids.len(), "Stored UUID batch");

    Ok(key)
}

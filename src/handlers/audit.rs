//! Audit trail built from a DynamoDB change stream.
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::models::AuditEntry;
use crate::store::{DocumentStore, StoreError};
use crate::triggers::{StreamEvent, StreamRecord};

fn image(item: Option<&serde_dynamo::Item>) -> Result<Map<String, Value>, StoreError> {
    match item {
        Some(item) => Ok(serde_dynamo::from_item(item.clone())?),
        None => Ok(Map::new()),
    }
}

/// Audit entries for one stream record.
///
/// `INSERT` yields a single entry holding the whole new item. `MODIFY` yields
/// one entry per attribute of the new image whose value changed. Other event
/// names yield nothing.
pub fn audit_entries(record: &StreamRecord, modification_time: &str) -> Result<Vec<AuditEntry>, StoreError> {
    let entry = |item_key: &Value, updated_attribute: Option<&str>, old_value: Option<&Value>, new_value: Value| AuditEntry {
        id: Uuid::new_v4().to_string(),
        item_key: item_key.clone(),
        modification_time: modification_time.to_string(),
        updated_attribute: updated_attribute.map(str::to_string),
        old_value: old_value.cloned(),
        new_value,
    };

    match record.event_name.as_deref() {
        Some("INSERT") => {
            let new_item = image(record.dynamodb.new_image.as_ref())?;
            let item_key = new_item.get("key").cloned().unwrap_or(Value::Null);
            Ok(vec![entry(&item_key, None, None, Value::Object(new_item))])
        }
        Some("MODIFY") => {
            let old_item = image(record.dynamodb.old_image.as_ref())?;
            let new_item = image(record.dynamodb.new_image.as_ref())?;
            let item_key = new_item.get("key").cloned().unwrap_or(Value::Null);

            Ok(new_item
                .iter()
                .filter(|(attribute, value)| old_item.get(*attribute) != Some(*value))
                .map(|(attribute, value)| entry(&item_key, Some(attribute.as_str()), old_item.get(attribute), value.clone()))
                .collect())
        }
        _ => Ok(Vec::new()),
    }
}

/// Write audit entries for every record of the batch.
///
/// A failing record is logged and skipped; the invocation itself never fails.
/// Returns the number of entries written.
pub async fn handle_audit_stream<S: DocumentStore>(event: &StreamEvent, store: &S, collection: &str) -> usize {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut written = 0;

    for record in &event.records {
        let entries = match audit_entries(record, &now) {
            Ok(entries) => entries,
            Err(e) => {
                error!(event_name = ?record.event_name, error = %e, "Could not read stream record");
                continue;
            }
        };

        for entry in entries {
            match store.put(collection, &entry).await {
                Ok(()) => {
                    info!(audit_id = %entry.id, attribute = ?entry.updated_attribute, "Audit entry written");
                    written += 1;
                }
                Err(e) => error!(audit_id = %entry.id, error = %e, "Failed to write audit entry"),
            }
        }
    }

    written
}

//! Table handlers (create, list, get by id).
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{ApiError, Result};
use crate::models::Table;
use crate::store::{DocumentStore, Filter, Key, StoreError};

/// Render a stored item for the response body.
fn stored_payload<T: Serialize>(item: &T) -> Result<Value> {
    serde_json::to_value(item).map_err(|e| StoreError::Conversion(e.to_string()).into())
}

/// Persists a table as given. Tables are never updated afterwards.
pub async fn handle_create_table<S: DocumentStore>(table: Table, store: &S, collection: &str) -> Result<Value> {
    store.put(collection, &table).await?;
    Ok(json!({ "id": table.id }))
}

pub async fn handle_list_tables<S: DocumentStore>(store: &S, collection: &str) -> Result<Value> {
    let tables: Vec<Table> = store.scan(collection, &Filter::all()).await?;
    Ok(json!({ "tables": tables }))
}

/// Looks a table up by the `{tableId}` path parameter.
pub async fn handle_get_table<S: DocumentStore>(table_id: &str, store: &S, collection: &str) -> Result<Value> {
    let id: i64 = table_id
        .trim()
        .parse()
        .map_err(|_| ApiError::validation("Invalid table id"))?;

    let table: Table = store
        .get(collection, &Key::new("id", id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Table not found".to_string()))?;

    stored_payload(&table)
}

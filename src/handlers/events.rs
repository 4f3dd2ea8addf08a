//! Events API: wrap the posted content and persist it.
use chrono::{SecondsFormat, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CreateEventRequest, Event};
use crate::store::DocumentStore;

pub async fn handle_create_event<S: DocumentStore>(request: CreateEventRequest, store: &S, collection: &str) -> Result<Event> {
    let event = Event {
        id: Uuid::new_v4().to_string(),
        principal_id: request.principal_id,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        body: request.content,
    };

    store.put(collection, &event).await?;
    info!(event_id = %event.id, principal_id = %event.principal_id, "Event stored");

    Ok(event)
}

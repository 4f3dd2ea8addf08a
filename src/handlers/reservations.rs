//! Reservation handlers and the double-booking check.
//!
//! Creating a reservation takes three separate store round-trips: the table
//! lookup, the overlap scan and the write. Nothing makes them atomic, so two
//! concurrent requests for the same table, date and slot can both pass.
use chrono::NaiveDate;
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Collections;
use crate::error::{ApiError, Result};
use crate::models::{CreateReservationRequest, Reservation, Table};
use crate::slots::Slot;
use crate::store::{DocumentStore, Filter, StoreError};

/// The four fields that identify a slot, checked and normalized.
///
/// `date` and the slot times are stored in canonical form (`YYYY-MM-DD`,
/// zero-padded `HH:MM`) because the overlap scan matches dates exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRequest {
    pub table_number: i64,
    pub date: String,
    pub slot_time_start: String,
    pub slot_time_end: String,
    pub slot: Slot,
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Local validation of a reservation request. No store access.
pub fn validate_request(request: &CreateReservationRequest) -> Result<SlotRequest> {
    let (Some(table_number), Some(date), Some(start), Some(end)) = (
        request.table_number,
        required(&request.date),
        required(&request.slot_time_start),
        required(&request.slot_time_end),
    ) else {
        return Err(ApiError::validation("Missing required reservation data"));
    };

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("Invalid date {:?}, expected YYYY-MM-DD", date)))?;
    let slot = Slot::parse(start, end).map_err(|e| ApiError::validation(e.to_string()))?;

    Ok(SlotRequest {
        table_number,
        date: date.format("%Y-%m-%d").to_string(),
        slot_time_start: slot.start_label(),
        slot_time_end: slot.end_label(),
        slot,
    })
}

async fn table_exists<S: DocumentStore>(store: &S, collection: &str, table_number: i64) -> Result<bool> {
    let tables: Vec<Table> = store
        .scan(collection, &Filter::all().and_eq("number", table_number))
        .await?;
    Ok(!tables.is_empty())
}

/// Returns the first stored reservation on the same table and date whose slot overlaps.
async fn find_overlap<S: DocumentStore>(store: &S, collection: &str, candidate: &SlotRequest) -> Result<Option<Reservation>> {
    let existing: Vec<Reservation> = store
        .scan(
            collection,
            &Filter::all()
                .and_eq("tableNumber", candidate.table_number)
                .and_eq("date", candidate.date.as_str()),
        )
        .await?;

    for reservation in existing {
        let slot = Slot::parse(&reservation.slot_time_start, &reservation.slot_time_end).map_err(|e| {
            StoreError::Conversion(format!("Stored reservation {} has an invalid slot: {}", reservation.id, e))
        })?;
        if slot.overlaps(&candidate.slot) {
            return Ok(Some(reservation));
        }
    }
    Ok(None)
}

/// Validate and persist a new reservation, returning its generated id.
pub async fn handle_create_reservation<S: DocumentStore>(
    request: CreateReservationRequest,
    store: &S,
    collections: &Collections,
) -> Result<Value> {
    let candidate = validate_request(&request)?;

    if !table_exists(store, &collections.tables, candidate.table_number).await? {
        return Err(ApiError::validation("Table does not exist"));
    }

    if let Some(conflict) = find_overlap(store, &collections.reservations, &candidate).await? {
        warn!(
            table_number = candidate.table_number,
            date = %candidate.date,
            requested = %candidate.slot,
            conflicting_id = %conflict.id,
            "Rejected overlapping reservation"
        );
        return Err(ApiError::validation("Overlapping reservation exists"));
    }

    let reservation = Reservation {
        id: Uuid::new_v4().to_string(),
        table_number: candidate.table_number,
        client_name: request.client_name,
        phone_number: request.phone_number,
        date: candidate.date,
        slot_time_start: candidate.slot_time_start,
        slot_time_end: candidate.slot_time_end,
    };
    store.put(&collections.reservations, &reservation).await?;

    info!(reservation_id = %reservation.id, table_number = reservation.table_number, "Reservation created");
    Ok(json!({ "reservationId": reservation.id }))
}

pub async fn handle_list_reservations<S: DocumentStore>(store: &S, collection: &str) -> Result<Value> {
    let reservations: Vec<Reservation> = store.scan(collection, &Filter::all()).await?;
    Ok(json!({ "reservations": reservations }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    const DATE: &str = "2024-05-01";

    fn collections() -> Collections {
        Collections::default()
    }

    fn store_with_table(number: i64) -> MemoryStore {
        let store = MemoryStore::new();
        store.seed(
            "Tables",
            [json!({ "id": number * 10, "number": number, "places": 4, "isVip": false, "minOrder": null })],
        );
        store
    }

    fn request(table_number: i64, start: &str, end: &str) -> CreateReservationRequest {
        CreateReservationRequest {
            table_number: Some(table_number),
            client_name: Some("Grace Hopper".to_string()),
            phone_number: Some("+1 555 0100".to_string()),
            date: Some(DATE.to_string()),
            slot_time_start: Some(start.to_string()),
            slot_time_end: Some(end.to_string()),
        }
    }

    async fn book(store: &MemoryStore, table_number: i64, start: &str, end: &str) -> Result<Value> {
        handle_create_reservation(request(table_number, start, end), store, &collections()).await
    }

    #[tokio::test]
    async fn test_missing_fields_never_touch_the_store() {
        let store = store_with_table(5);
        let mut cases = Vec::new();
        for field in 0..4 {
            let mut r = request(5, "09:00", "10:00");
            match field {
                0 => r.table_number = None,
                1 => r.date = None,
                2 => r.slot_time_start = None,
                _ => r.slot_time_end = Some("  ".to_string()),
            }
            cases.push(r);
        }

        for r in cases {
            let err = handle_create_reservation(r, &store, &collections()).await.unwrap_err();
            assert_eq!(err.to_string(), "Missing required reservation data");
            assert_eq!(err.status_code(), 400);
        }
        assert_eq!(store.reads(), 0);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_unknown_table() {
        let store = store_with_table(5);
        let err = book(&store, 6, "09:00", "10:00").await.unwrap_err();
        assert_eq!(err.to_string(), "Table does not exist");
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_overlap_rejected_and_touching_edge_accepted() {
        let store = store_with_table(5);
        book(&store, 5, "09:00", "10:00").await.unwrap();

        let err = book(&store, 5, "09:30", "10:30").await.unwrap_err();
        assert_eq!(err.to_string(), "Overlapping reservation exists");
        assert_eq!(store.writes(), 1);

        book(&store, 5, "10:00", "11:00").await.unwrap();
        assert_eq!(store.writes(), 2);
    }

    #[tokio::test]
    async fn test_one_minute_overlap_rejected() {
        let store = store_with_table(5);
        book(&store, 5, "09:00", "10:00").await.unwrap();
        assert!(book(&store, 5, "09:59", "10:30").await.is_err());
    }

    #[tokio::test]
    async fn test_other_date_or_table_does_not_conflict() {
        let store = store_with_table(5);
        store.seed(
            "Tables",
            [json!({ "id": 60, "number": 6, "places": 2, "isVip": true, "minOrder": 50 })],
        );
        book(&store, 5, "09:00", "10:00").await.unwrap();

        book(&store, 6, "09:00", "10:00").await.unwrap();

        let mut other_day = request(5, "09:00", "10:00");
        other_day.date = Some("2024-05-02".to_string());
        handle_create_reservation(other_day, &store, &collections()).await.unwrap();

        assert_eq!(store.writes(), 3);
    }

    #[tokio::test]
    async fn test_created_reservation_is_listed() {
        let store = store_with_table(5);
        let first = book(&store, 5, "09:00", "10:00").await.unwrap();
        let second = book(&store, 5, "12:00", "13:00").await.unwrap();

        let first_id = first["reservationId"].as_str().unwrap().to_string();
        let second_id = second["reservationId"].as_str().unwrap().to_string();
        assert_ne!(first_id, second_id);
        assert!(Uuid::parse_str(&first_id).is_ok());

        let listed = handle_list_reservations(&store, "Reservations").await.unwrap();
        let ids: Vec<&str> = listed["reservations"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r["id"].as_str())
            .collect();
        assert!(ids.contains(&first_id.as_str()));
        assert!(ids.contains(&second_id.as_str()));
    }

    #[tokio::test]
    async fn test_stored_fields() {
        let store = store_with_table(5);
        book(&store, 5, "18:00", "19:30").await.unwrap();

        let stored = &store.items("Reservations")[0];
        assert_eq!(stored["tableNumber"], 5);
        assert_eq!(stored["clientName"], "Grace Hopper");
        assert_eq!(stored["phoneNumber"], "+1 555 0100");
        assert_eq!(stored["date"], DATE);
        assert_eq!(stored["slotTimeStart"], "18:00");
        assert_eq!(stored["slotTimeEnd"], "19:30");
    }

    #[tokio::test]
    async fn test_unpadded_date_still_conflicts() {
        let store = store_with_table(5);
        book(&store, 5, "09:00", "10:00").await.unwrap();

        let mut same_day = request(5, "09:30", "10:30");
        same_day.date = Some("2024-5-1".to_string());
        let err = handle_create_reservation(same_day, &store, &collections()).await.unwrap_err();
        assert_eq!(err.to_string(), "Overlapping reservation exists");
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_date_is_stored_canonical() {
        let store = store_with_table(5);
        let mut r = request(5, "09:00", "10:00");
        r.date = Some("2024-5-1".to_string());
        handle_create_reservation(r, &store, &collections()).await.unwrap();

        assert_eq!(store.items("Reservations")[0]["date"], DATE);
    }

    #[tokio::test]
    async fn test_bad_formats_are_validation_errors() {
        let store = store_with_table(5);

        let mut bad_date = request(5, "09:00", "10:00");
        bad_date.date = Some("01/05/2024".to_string());
        let err = handle_create_reservation(bad_date, &store, &collections()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = book(&store, 5, "9am", "10:00").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = book(&store, 5, "9:00", "10:00").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = book(&store, 5, "10:00", "09:00").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        assert_eq!(store.reads(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_stored_slot_is_reported() {
        let store = store_with_table(5);
        store.seed(
            "Reservations",
            [json!({
                "id": "legacy", "tableNumber": 5, "date": DATE,
                "slotTimeStart": "noon", "slotTimeEnd": "13:00"
            })],
        );

        let err = book(&store, 5, "15:00", "16:00").await.unwrap_err();
        assert!(matches!(err, ApiError::Store(StoreError::Conversion(_))));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_client_error() {
        let store = MemoryStore::failing("ProvisionedThroughputExceededException");
        let err = book(&store, 5, "09:00", "10:00").await.unwrap_err();
        assert!(matches!(err, ApiError::Store(_)));
        assert_eq!(err.status_code(), 400);
    }
}

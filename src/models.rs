use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: i64,
    pub number: i64,
    #[serde(rename = "places")]
    pub seating_capacity: i64,
    pub is_vip: bool,
    #[serde(rename = "minOrder", default)]
    pub min_order_amount: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub table_number: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub date: String,
    pub slot_time_start: String,
    pub slot_time_end: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    /// Stored as sent; clients use both numeric and string ids.
    pub principal_id: Value,
    pub created_at: String,
    pub body: Value,
}

/// One row of the audit trail produced from a change stream.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub item_key: Value,
    pub modification_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    pub new_value: Value,
}

// Request Bodies
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Reservation request as sent by the client. Every field is optional so that
/// missing data is reported as a validation error rather than a parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub table_number: Option<i64>,
    pub client_name: Option<String>,
    pub phone_number: Option<String>,
    pub date: Option<String>,
    pub slot_time_start: Option<String>,
    pub slot_time_end: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub principal_id: Value,
    #[serde(default)]
    pub content: Value,
}

//! Document store boundary.
//!
//! Handlers only see [`DocumentStore`]; the DynamoDB implementation lives in
//! [`dynamo`]. Items travel as serde types and the store does the conversion.

pub mod dynamo;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use dynamo::DynamoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected or failed the call
    #[error("Store request failed: {0}")]
    Request(String),

    /// An item could not be converted to or from the store's representation
    #[error("Item conversion failed: {0}")]
    Conversion(String),
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(err: serde_dynamo::Error) -> Self {
        StoreError::Conversion(err.to_string())
    }
}

/// Primary key lookup: a single attribute name and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub name: String,
    pub value: Value,
}

impl Key {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Conjunction of attribute equality conditions applied during a scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Matches every item.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and_eq(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((attribute.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether a JSON item satisfies every condition.
    pub fn matches(&self, item: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(attribute, expected)| item.get(attribute) == Some(expected))
    }
}

/// Key-value document store without transactions.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Write `item`, replacing any item with the same key.
    async fn put<T: Serialize>(&self, collection: &str, item: &T) -> Result<(), StoreError>;

    async fn get<T: DeserializeOwned>(&self, collection: &str, key: &Key) -> Result<Option<T>, StoreError>;

    /// Read every item of `collection` that satisfies `filter`.
    async fn scan<T: DeserializeOwned>(&self, collection: &str, filter: &Filter) -> Result<Vec<T>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matches_all_conditions() {
        let filter = Filter::all().and_eq("tableNumber", 5).and_eq("date", "2024-05-01");
        assert!(filter.matches(&json!({ "tableNumber": 5, "date": "2024-05-01", "id": "x" })));
        assert!(!filter.matches(&json!({ "tableNumber": 5, "date": "2024-05-02" })));
        assert!(!filter.matches(&json!({ "date": "2024-05-01" })));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::all();
        assert!(filter.is_empty());
        assert!(filter.matches(&json!({ "anything": true })));
    }

    #[test]
    fn test_filter_is_type_sensitive() {
        let filter = Filter::all().and_eq("number", 5);
        assert!(!filter.matches(&json!({ "number": "5" })));
    }
}

//! DynamoDB-backed [`DocumentStore`].
use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{DocumentStore, Filter, Key, StoreError};

pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Render `filter` as a `FilterExpression` with `#fN` name and `:vN` value placeholders.
///
/// Placeholders keep reserved words such as `number` and `date` usable as attribute names.
pub fn filter_expression(filter: &Filter) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    let clauses: Vec<String> = (0..filter.conditions().len())
        .map(|i| format!("#f{i} = :v{i}"))
        .collect();
    Some(clauses.join(" AND "))
}

fn apply_filter(mut scan: ScanFluentBuilder, filter: &Filter) -> Result<ScanFluentBuilder, StoreError> {
    let Some(expression) = filter_expression(filter) else {
        return Ok(scan);
    };
    scan = scan.filter_expression(expression);
    for (i, (attribute, value)) in filter.conditions().iter().enumerate() {
        let value: AttributeValue = serde_dynamo::to_attribute_value(value)?;
        scan = scan
            .expression_attribute_names(format!("#f{i}"), attribute)
            .expression_attribute_values(format!(":v{i}"), value);
    }
    Ok(scan)
}

impl DocumentStore for DynamoStore {
    async fn put<T: Serialize>(&self, collection: &str, item: &T) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(item)?;

        self.client
            .put_item()
            .table_name(collection)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Failed to put item into {}: {}", collection, DisplayErrorContext(&e))))?;

        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, collection: &str, key: &Key) -> Result<Option<T>, StoreError> {
        let key_value: AttributeValue = serde_dynamo::to_attribute_value(&key.value)?;

        let output = self
            .client
            .get_item()
            .table_name(collection)
            .key(&key.name, key_value)
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Failed to get item from {}: {}", collection, DisplayErrorContext(&e))))?;

        match output.item {
            Some(item) => Ok(Some(serde_dynamo::from_item(item)?)),
            None => Ok(None),
        }
    }

    async fn scan<T: DeserializeOwned>(&self, collection: &str, filter: &Filter) -> Result<Vec<T>, StoreError> {
        let scan = apply_filter(self.client.scan().table_name(collection), filter)?;

        let mut pages = scan.into_paginator().items().send();
        let mut items: Vec<HashMap<String, AttributeValue>> = Vec::new();
        while let Some(item) = pages
            .try_next()
            .await
            .map_err(|e| StoreError::Request(format!("Failed to scan {}: {}", collection, DisplayErrorContext(&e))))?
        {
            items.push(item);
        }

        Ok(serde_dynamo::from_items(items)?)
    }
}

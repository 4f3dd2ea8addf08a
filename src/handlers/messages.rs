//! Queue and topic consumers. Both only log what they receive.
use serde_json::{Value, json};
use tracing::info;

use crate::triggers::{SnsEvent, SqsEvent};

fn processed() -> Value {
    json!({ "statusCode": 200, "body": "\"Messages processed successfully\"" })
}

pub fn handle_sqs_messages(event: &SqsEvent) -> Value {
    for record in &event.records {
        info!(
            message_id = record.message_id.as_deref().unwrap_or_default(),
            body = record.body.as_deref().unwrap_or_default(),
            "Received SQS message"
        );
    }
    processed()
}

pub fn handle_sns_messages(event: &SnsEvent) -> Value {
    for record in &event.records {
        info!(
            message_id = record.sns.message_id.as_deref().unwrap_or_default(),
            message = record.sns.message.as_deref().unwrap_or_default(),
            "Received SNS message"
        );
    }
    processed()
}

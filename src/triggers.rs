//! Payloads delivered by the non-HTTP triggers (SQS, SNS, DynamoDB streams).
//!
//! Only the fields the functions read are modelled; everything else in the
//! event is ignored on deserialization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SqsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SqsMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqsMessage {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsMessage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessage {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StreamRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub dynamodb: StreamImages,
}

/// Item images in DynamoDB's typed attribute format.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamImages {
    #[serde(default)]
    pub new_image: Option<serde_dynamo::Item>,
    #[serde(default)]
    pub old_image: Option<serde_dynamo::Item>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sqs_event() {
        let event: SqsEvent = serde_json::from_value(json!({
            "Records": [{ "messageId": "m-1", "body": "hello", "eventSource": "aws:sqs" }]
        }))
        .unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].body.as_deref(), Some("hello"));
    }

    #[test]
    fn test_sns_event() {
        let event: SnsEvent = serde_json::from_value(json!({
            "Records": [{ "EventSource": "aws:sns", "Sns": { "MessageId": "n-1", "Message": "ping", "Type": "Notification" } }]
        }))
        .unwrap();
        assert_eq!(event.records[0].sns.message_id.as_deref(), Some("n-1"));
        assert_eq!(event.records[0].sns.message.as_deref(), Some("ping"));
    }

    #[test]
    fn test_stream_event_images() {
        let event: StreamEvent = serde_json::from_value(json!({
            "Records": [{
                "eventName": "MODIFY",
                "dynamodb": {
                    "Keys": { "key": { "S": "CACHE_KEY" } },
                    "OldImage": { "key": { "S": "CACHE_KEY" }, "value": { "N": "1" } },
                    "NewImage": { "key": { "S": "CACHE_KEY" }, "value": { "N": "2" } }
                }
            }]
        }))
        .unwrap();

        let record = &event.records[0];
        assert_eq!(record.event_name.as_deref(), Some("MODIFY"));
        assert!(record.dynamodb.old_image.is_some());
        assert!(record.dynamodb.new_image.is_some());
    }

    #[test]
    fn test_empty_event() {
        let event: StreamEvent = serde_json::from_value(json!({})).unwrap();
        assert!(event.records.is_empty());
    }
}

use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::info;

use table_booking::config::{env_or, load_aws_config};
use table_booking::handlers::handle_audit_stream;
use table_booking::store::DynamoStore;
use table_booking::triggers::StreamEvent;

struct AuditProducer {
    store: DynamoStore,
    collection: String,
}

async fn function_handler(event: LambdaEvent<StreamEvent>, producer: &AuditProducer) -> Result<(), Error> {
    let records = event.payload.records.len();
    let written = handle_audit_stream(&event.payload, &producer.store, &producer.collection).await;
    info!(records, written, "Processed stream batch");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let sdk_config = load_aws_config(None).await;
    let producer = Arc::new(AuditProducer {
        store: DynamoStore::new(DynamoDbClient::new(&sdk_config)),
        collection: env_or("audit_table", "Audit"),
    });

    run(service_fn(move |event: LambdaEvent<StreamEvent>| {
        let producer = Arc::clone(&producer);
        async move { function_handler(event, &producer).await }
    }))
    .await
}

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;

use table_booking::handlers::handle_sqs_messages;
use table_booking::triggers::SqsEvent;

async fn function_handler(event: LambdaEvent<SqsEvent>) -> Result<Value, Error> {
    Ok(handle_sqs_messages(&event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();
    run(service_fn(function_handler)).await
}

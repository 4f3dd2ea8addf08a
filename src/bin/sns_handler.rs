use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;

use table_booking::handlers::handle_sns_messages;
use table_booking::triggers::SnsEvent;

async fn function_handler(event: LambdaEvent<SnsEvent>) -> Result<Value, Error> {
    Ok(handle_sns_messages(&event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();
    run(service_fn(function_handler)).await
}

use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use serde_json::json;
use tracing::error;

use table_booking::config::{env_or, load_aws_config};
use table_booking::handlers::handle_create_event;
use table_booking::http::{json_response, parse_json_body};
use table_booking::store::DynamoStore;

struct EventsApi {
    store: DynamoStore,
    collection: String,
}

async fn function_handler(event: Request, api: &EventsApi) -> Result<Response<Body>, Error> {
    let outcome = match parse_json_body(event.body()) {
        Ok(request) => handle_create_event(request, &api.store, &api.collection).await,
        Err(e) => Err(e),
    };

    Ok(match outcome {
        Ok(created) => json_response(201, &json!({ "message": "Event created successfully", "event": created })),
        Err(e) => {
            error!(error = %e, "Failed to create event");
            json_response(500, &json!({ "message": "An error occurred", "error": e.to_string() }))
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let sdk_config = load_aws_config(None).await;
    let api = Arc::new(EventsApi {
        store: DynamoStore::new(DynamoDbClient::new(&sdk_config)),
        collection: env_or("target_table", "Events"),
    });

    run(service_fn(move |event: Request| {
        let api = Arc::clone(&api);
        async move { function_handler(event, &api).await }
    }))
    .await
}

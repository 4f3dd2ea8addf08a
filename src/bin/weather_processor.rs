use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use serde_json::json;
use tracing::error;

use table_booking::config::{env_or, load_aws_config};
use table_booking::handlers::handle_store_weather;
use table_booking::http::{error_response, json_response};
use table_booking::open_meteo::OpenMeteoClient;
use table_booking::store::DynamoStore;

struct WeatherProcessor {
    weather: OpenMeteoClient,
    store: DynamoStore,
    collection: String,
}

async fn function_handler(_event: Request, processor: &WeatherProcessor) -> Result<Response<Body>, Error> {
    Ok(match handle_store_weather(&processor.weather, &processor.store, &processor.collection).await {
        Ok(item) => json_response(200, &json!({ "message": "Weather data stored successfully", "item": item })),
        Err(e) => {
            error!(error = %e, "Weather snapshot failed");
            error_response(500, "Failed to fetch or store weather data")
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let sdk_config = load_aws_config(None).await;
    let processor = Arc::new(WeatherProcessor {
        weather: OpenMeteoClient::new(),
        store: DynamoStore::new(DynamoDbClient::new(&sdk_config)),
        collection: env_or("weather_table", "Weather"),
    });

    run(service_fn(move |event: Request| {
        let processor = Arc::clone(&processor);
        async move { function_handler(event, &processor).await }
    }))
    .await
}

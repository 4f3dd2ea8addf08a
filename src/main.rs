use std::sync::Arc;

use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use lambda_http::{Body, Error, Request, Response, run, service_fn};

use table_booking::api::BookingApi;
use table_booking::config::{BookingConfig, load_aws_config};
use table_booking::identity::CognitoIdentity;
use table_booking::store::DynamoStore;

type Api = BookingApi<DynamoStore, CognitoIdentity>;

/// Main Lambda handler function
async fn function_handler(event: Request, api: &Api) -> Result<Response<Body>, Error> {
    Ok(api.handle(&event).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let config = BookingConfig::from_env()?;
    let sdk_config = load_aws_config(config.region.as_deref()).await;
    tracing::info!(
        tables = %config.collections.tables,
        reservations = %config.collections.reservations,
        stage = ?config.api_stage,
        "Booking API starting"
    );

    let api: Arc<Api> = Arc::new(
        BookingApi::new(
            DynamoStore::new(DynamoDbClient::new(&sdk_config)),
            CognitoIdentity::new(CognitoClient::new(&sdk_config), config.user_pool_name, config.client_name),
            config.collections,
        )
        .with_api_stage(config.api_stage),
    );

    run(service_fn(move |event: Request| {
        let api = Arc::clone(&api);
        async move { function_handler(event, &api).await }
    }))
    .await
}

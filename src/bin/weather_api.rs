use std::sync::Arc;

use lambda_http::{Body, Error, Request, Response, run, service_fn};
use tracing::error;

use table_booking::handlers::handle_current_weather;
use table_booking::http::{error_response, json_response};
use table_booking::open_meteo::OpenMeteoClient;

async fn function_handler(_event: Request, weather: &OpenMeteoClient) -> Result<Response<Body>, Error> {
    Ok(match handle_current_weather(weather).await {
        Ok(forecast) => json_response(200, &forecast),
        Err(e) => {
            error!(error = %e, "Forecast request failed");
            error_response(500, &e.to_string())
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let weather = Arc::new(OpenMeteoClient::new());
    run(service_fn(move |event: Request| {
        let weather = Arc::clone(&weather);
        async move { function_handler(event, &weather).await }
    }))
    .await
}

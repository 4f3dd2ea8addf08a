use lambda_http::{Body, Error, Request, Response, run, service_fn};

use table_booking::handlers::handle_greeting;
use table_booking::http::json_response;

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let (status, body) = handle_greeting(event.method().as_str(), event.uri().path());
    Ok(json_response(status, &body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();
    run(service_fn(function_handler)).await
}

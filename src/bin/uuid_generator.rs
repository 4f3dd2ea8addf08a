use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use chrono::Utc;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::error;

use table_booking::config::{load_aws_config, require};
use table_booking::handlers::handle_uuid_batch;
use table_booking::objects::S3Objects;

struct UuidGenerator {
    objects: S3Objects,
    bucket: String,
}

async fn function_handler(_event: LambdaEvent<Value>, generator: &UuidGenerator) -> Result<(), Error> {
    handle_uuid_batch(&generator.objects, &generator.bucket, Utc::now())
        .await
        .map_err(|e| {
            error!(bucket = %generator.bucket, error = %e, "UUID batch failed");
            Error::from("Failed to generate UUIDs or store in S3")
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let bucket = require("target_bucket")?;
    let sdk_config = load_aws_config(None).await;
    let generator = Arc::new(UuidGenerator { objects: S3Objects::new(S3Client::new(&sdk_config)), bucket });

    run(service_fn(move |event: LambdaEvent<Value>| {
        let generator = Arc::clone(&generator);
        async move { function_handler(event, &generator).await }
    }))
    .await
}

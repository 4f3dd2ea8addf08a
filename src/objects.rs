//! Object store boundary backed by S3.

use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::store::StoreError;

#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError>;
}

pub struct S3Objects {
    client: S3Client,
}

impl S3Objects {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

impl ObjectStore for S3Objects {
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Failed to upload {} to {}: {}", key, bucket, DisplayErrorContext(&e))))?;

        Ok(())
    }
}

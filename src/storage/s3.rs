// src/storage/s3.rs
// S3-backed object store

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3 as s3;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use super::ObjectStore;

#[derive(Clone)]
pub struct S3Store {
    client: s3::Client,
}

impl S3Store {
    /// Build a client for `region`; credentials come from the default AWS provider chain.
    pub async fn connect(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        info!(region = %region, "S3 client initialized");
        Self::from_client(s3::Client::new(&config))
    }

    pub fn from_client(client: s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<(), String> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;

        info!("Uploading audio to s3://{}/{}", bucket, key);
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| DisplayErrorContext(&e).to_string())?;
        Ok(())
    }

    async fn put_bytes(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| DisplayErrorContext(&e).to_string())?;
        debug!("Stored s3://{}/{}", bucket, key);
        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, String> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    Ok(false)
                } else {
                    Err(DisplayErrorContext(&e).to_string())
                }
            }
        }
    }

    async fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, String> {
        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| e.to_string())?;
        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| DisplayErrorContext(&e).to_string())?;
        Ok(request.uri().to_string())
    }
}

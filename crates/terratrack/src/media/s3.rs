//! S3-backed image store.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use uuid::Uuid;

use terratrack_core::media::{ImageStore, MediaError, Result};

use super::keys;

/// Image store backed by an S3 bucket.
pub struct S3ImageStore {
    client: Client,
    bucket: String,
}

impl S3ImageStore {
    /// Creates a new store with the given S3 client and bucket.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Creates a new store from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        Self::new(client, bucket)
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put_image(&self, user_id: Uuid, filename: &str, bytes: Vec<u8>) -> Result<String> {
        let key = keys::image_key(user_id, Uuid::new_v4(), filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| MediaError::Upload(e.to_string()))?;

        Ok(keys::public_url(&self.bucket, &key))
    }

    async fn delete_image(&self, image_url: &str) -> Result<()> {
        let key = keys::key_from_url(image_url)
            .ok_or_else(|| MediaError::UnrecognizedUrl(image_url.to_string()))?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| MediaError::Delete(e.to_string()))?;

        Ok(())
    }

    async fn list_user_images(&self, user_id: Uuid) -> Result<Vec<String>> {
        let prefix = keys::user_prefix(user_id);

        let result = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&prefix)
            .send()
            .await
            .map_err(|e| MediaError::Upload(e.to_string()))?;

        let urls = result
            .contents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|object| object.key)
            .map(|key| keys::public_url(&self.bucket, &key))
            .collect();

        Ok(urls)
    }
}

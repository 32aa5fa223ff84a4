//! In-memory image store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use terratrack_core::media::{ImageStore, MediaError, Result};

use super::keys;

/// In-memory image store for development and tests.
///
/// Objects are held in a HashMap keyed by object key. URLs follow the same
/// shape as the S3 store so handlers behave identically across backends.
#[derive(Debug, Clone)]
pub struct InMemoryImageStore {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryImageStore {
    /// Creates a new empty store naming the given virtual bucket.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn put_image(&self, user_id: Uuid, filename: &str, bytes: Vec<u8>) -> Result<String> {
        let key = keys::image_key(user_id, Uuid::new_v4(), filename);
        let url = keys::public_url(&self.bucket, &key);

        let mut objects = self.objects.write().await;
        objects.insert(key, bytes);

        Ok(url)
    }

    async fn delete_image(&self, image_url: &str) -> Result<()> {
        let key = keys::key_from_url(image_url)
            .ok_or_else(|| MediaError::UnrecognizedUrl(image_url.to_string()))?;

        let mut objects = self.objects.write().await;
        objects.remove(key);
        Ok(())
    }

    async fn list_user_images(&self, user_id: Uuid) -> Result<Vec<String>> {
        let prefix = keys::user_prefix(user_id);
        let objects = self.objects.read().await;

        let mut urls: Vec<String> = objects
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .map(|key| keys::public_url(&self.bucket, key))
            .collect();
        urls.sort();
        Ok(urls)
    }
}

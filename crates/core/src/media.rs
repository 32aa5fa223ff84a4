//! Image storage abstraction for planting photos.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during image storage operations.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("delete failed: {0}")]
    Delete(String),
    #[error("unrecognized image URL: {0}")]
    UnrecognizedUrl(String),
}

/// Result type for image storage operations.
pub type Result<T> = std::result::Result<T, MediaError>;

/// Storage for planting photos.
///
/// Implementations own the key layout and return public URLs; callers only
/// ever hold URLs, which is also what gets persisted on the planting.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores image bytes for a user and returns the public URL.
    async fn put_image(&self, user_id: Uuid, filename: &str, bytes: Vec<u8>) -> Result<String>;

    /// Deletes an image by its public URL.
    async fn delete_image(&self, image_url: &str) -> Result<()>;

    /// Lists the public URLs of a user's images.
    async fn list_user_images(&self, user_id: Uuid) -> Result<Vec<String>>;
}

//! Object key and URL generation for planting images.
//!
//! Pure functions shared by the image store implementations.

use uuid::Uuid;

pub const IMAGE_KEY_PREFIX: &str = "media/planting_images/";

/// Generate the object key for a planting image.
///
/// Pattern: `media/planting_images/<user_id>/<image_id>.<ext>`
///
/// The extension is taken from the uploaded filename, defaulting to "jpg"
/// when the filename has none.
pub fn image_key(user_id: Uuid, image_id: Uuid, filename: &str) -> String {
    format!(
        "{IMAGE_KEY_PREFIX}{user_id}/{image_id}.{}",
        extension(filename)
    )
}

/// Generate the key prefix covering all images of a user.
pub fn user_prefix(user_id: Uuid) -> String {
    format!("{IMAGE_KEY_PREFIX}{user_id}/")
}

/// Build the public URL for an object key in the given bucket.
pub fn public_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}

/// Extract the object key from a public URL produced by [`public_url`].
///
/// Returns `None` for URLs that do not point at a planting image.
pub fn key_from_url(url: &str) -> Option<&str> {
    let (_, key) = url.split_once(".s3.amazonaws.com/")?;
    if key.starts_with(IMAGE_KEY_PREFIX) {
        Some(key)
    } else {
        None
    }
}

fn extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key() {
        let user_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();
        let image_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440009").unwrap();

        assert_eq!(
            image_key(user_id, image_id, "photo.png"),
            "media/planting_images/550e8400-e29b-41d4-a716-446655440001/\
             550e8400-e29b-41d4-a716-446655440009.png"
        );
    }

    #[test]
    fn test_image_key_defaults_extension() {
        let user_id = Uuid::new_v4();
        let image_id = Uuid::new_v4();

        assert!(image_key(user_id, image_id, "photo").ends_with(".jpg"));
        assert!(image_key(user_id, image_id, "photo.").ends_with(".jpg"));
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("terratrack-media", "media/planting_images/a/b.jpg"),
            "https://terratrack-media.s3.amazonaws.com/media/planting_images/a/b.jpg"
        );
    }

    #[test]
    fn test_key_from_url_round_trip() {
        let key = "media/planting_images/a/b.jpg";
        let url = public_url("terratrack-media", key);
        assert_eq!(key_from_url(&url), Some(key));
    }

    #[test]
    fn test_key_from_url_rejects_foreign_urls() {
        assert!(key_from_url("https://example.com/media/planting_images/a/b.jpg").is_none());
        assert!(key_from_url("https://bucket.s3.amazonaws.com/other/path.jpg").is_none());
    }
}

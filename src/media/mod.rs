//! Filesystem-backed photo storage.
//!
//! Embedded photos arrive as base64 data URIs. They are decoded and written
//! under a bucket directory that the router also serves back at `/media`.
//! A rejected write falls back to a placeholder URL rather than failing the
//! submission; callers must treat the returned URL as best effort.

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;

/// Bucket directory for guest photos.
const PHOTO_BUCKET: &str = "memories";

/// Object storage for uploaded photos.
pub struct MediaStore {
    root: PathBuf,
    public_base: String,
}

impl MediaStore {
    pub fn new(root: PathBuf, public_base: impl Into<String>) -> Self {
        let public_base = public_base.into().trim_end_matches('/').to_string();
        Self { root, public_base }
    }

    /// Decode an embedded image and store it, returning a URL it can be
    /// fetched from. Malformed payloads fail with a format error; storage
    /// failures degrade to a placeholder URL.
    pub async fn ingest(&self, data_uri: &str) -> Result<String, AppError> {
        let (mime, bytes) = parse_data_uri(data_uri)?;

        let ext = mime.split('/').nth(1).unwrap_or("bin").to_string();
        let timestamp = Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        let name = format!("{}-{}.{}", timestamp, &suffix[..8], ext);

        // Idempotent bucket creation
        let bucket_dir = self.root.join(PHOTO_BUCKET);
        if let Err(err) = tokio::fs::create_dir_all(&bucket_dir).await {
            tracing::warn!("could not prepare photo bucket: {}", err);
            return Ok(placeholder_url(timestamp, &ext));
        }

        if let Err(err) = tokio::fs::write(bucket_dir.join(&name), &bytes).await {
            tracing::warn!("photo write rejected, using placeholder url: {}", err);
            return Ok(placeholder_url(timestamp, &ext));
        }

        Ok(format!(
            "{}/media/{}/{}",
            self.public_base, PHOTO_BUCKET, name
        ))
    }
}

/// Split a `data:<mime>;base64,<payload>` string into its MIME type and
/// decoded bytes.
fn parse_data_uri(input: &str) -> Result<(String, Vec<u8>), AppError> {
    let rest = input
        .strip_prefix("data:")
        .ok_or_else(|| AppError::Format("embedded image is not a data URI".to_string()))?;

    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::Format("embedded image has no base64 payload".to_string()))?;

    if !mime.contains('/')
        || !mime
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '+' | '.' | '-'))
    {
        return Err(AppError::Format(format!(
            "unrecognized media type: {:?}",
            mime
        )));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|err| AppError::Format(format!("invalid base64 payload: {}", err)))?;

    Ok((mime.to_string(), bytes))
}

/// URL handed back when the object store rejects a write.
fn placeholder_url(timestamp: i64, ext: &str) -> String {
    format!("https://example.com/placeholder-image-{}.{}", timestamp, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_data_uri() -> String {
        let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        format!("data:image/png;base64,{}", STANDARD.encode(bytes))
    }

    #[tokio::test]
    async fn test_ingest_stores_png() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_path_buf(), "http://localhost:8080");

        let url = store.ingest(&png_data_uri()).await.unwrap();
        assert!(url.starts_with("http://localhost:8080/media/memories/"));
        assert!(url.ends_with(".png"));

        let name = url.rsplit('/').next().unwrap();
        assert!(dir.path().join("memories").join(name).exists());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_path_buf(), "http://localhost:8080");

        let err = store.ingest("not-a-data-uri").await.unwrap_err();
        assert!(matches!(err, AppError::Format(_)));

        let err = store
            .ingest("data:image/png;base64,@@not-base64@@")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Format(_)));
    }

    #[test]
    fn test_parse_data_uri_extracts_mime() {
        let (mime, bytes) = parse_data_uri(&png_data_uri()).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(&bytes[1..4], b"PNG");
    }
}

//! Blob storage collaborators.
//!
//! Handlers and the workflow service depend only on the [`BlobStore`]
//! trait; one adapter exists per provider and is selected by
//! configuration.

pub mod cloudinary;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use shared::{MediaError, MediaResult};

use crate::config::{StorageConfig, StorageProvider};
use cloudinary::CloudinaryBlobStore;
use s3::S3BlobStore;

/// Location of a stored blob: the resolvable URL handed to clients and
/// the provider's internal handle used for existence probes.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub url: String,
    pub public_id: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store raw bytes under `key` with the original content type.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> MediaResult<StoredBlob>;

    /// Best-effort probe that the blob is still reachable.
    async fn exists(&self, public_id: &str) -> MediaResult<bool>;
}

/// Construct the configured adapter for `provider`.
pub async fn build_blob_store(
    provider: StorageProvider,
    config: &StorageConfig,
) -> MediaResult<Arc<dyn BlobStore>> {
    match provider {
        StorageProvider::S3 => {
            let s3 = config.s3.as_ref().ok_or_else(|| {
                MediaError::Config("S3 storage selected but S3_* settings are missing".to_string())
            })?;
            Ok(Arc::new(S3BlobStore::new(s3).await))
        }
        StorageProvider::Cloudinary => {
            let cloudinary = config.cloudinary.as_ref().ok_or_else(|| {
                MediaError::Config(
                    "Cloudinary storage selected but CLOUDINARY_* settings are missing".to_string(),
                )
            })?;
            Ok(Arc::new(CloudinaryBlobStore::new(cloudinary)?))
        }
    }
}

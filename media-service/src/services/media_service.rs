//! The file-registration and resolution workflow.
//!
//! Registration order is the core correctness invariant: the blob
//! write precedes the record write, so a record never references a
//! blob that does not exist. The reverse failure (blob written, record
//! insert failed) leaves an orphaned blob, which is recoverable and
//! reported distinctly.

use std::sync::Arc;

use uuid::Uuid;

use shared::{MediaError, MediaResult};

use crate::db::RecordStore;
use crate::models::{MediaRecord, NewMediaRecord, RegisteredMedia, UploadedFile};
use crate::storage::BlobStore;
use crate::token::generate_access_token;

/// Bound on regenerate-and-retry after token collisions.
pub(crate) const MAX_TOKEN_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
pub struct MediaServiceConfig {
    pub max_file_size_bytes: Option<u64>,
    pub public_base_url: String,
    pub verify_blob_on_resolve: bool,
}

pub struct MediaService {
    blob_store: Arc<dyn BlobStore>,
    backup_store: Option<Arc<dyn BlobStore>>,
    record_store: Arc<dyn RecordStore>,
    config: MediaServiceConfig,
}

impl MediaService {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        backup_store: Option<Arc<dyn BlobStore>>,
        record_store: Arc<dyn RecordStore>,
        config: MediaServiceConfig,
    ) -> Self {
        Self {
            blob_store,
            backup_store,
            record_store,
            config,
        }
    }

    /// Register an uploaded file: validate, store the bytes, mint a
    /// unique access token, persist the metadata record, and return
    /// the shareable link.
    pub async fn register(&self, upload: UploadedFile) -> MediaResult<RegisteredMedia> {
        // Validation happens before any external call
        if upload.data.is_empty() {
            return Err(MediaError::Validation("No file provided".to_string()));
        }
        if upload.file_name.trim().is_empty() {
            return Err(MediaError::Validation("File name is required".to_string()));
        }
        if let Some(max) = self.config.max_file_size_bytes {
            if upload.data.len() as u64 > max {
                return Err(MediaError::PayloadTooLarge(format!(
                    "File exceeds the maximum size of {} bytes",
                    max
                )));
            }
        }

        let file_size = upload.data.len() as i64;
        let key = object_key(&upload.file_name);

        let backup_payload = self.backup_store.as_ref().map(|_| upload.data.clone());

        let blob = self
            .blob_store
            .put(&key, upload.data, Some(&upload.content_type))
            .await?;

        tracing::info!(
            file_name = %upload.file_name,
            file_size,
            public_id = %blob.public_id,
            "Blob stored"
        );

        // Explicit replication: outcome reported either way, upload
        // succeeds regardless
        if let (Some(backup), Some(payload)) = (&self.backup_store, backup_payload) {
            match backup.put(&key, payload, Some(&upload.content_type)).await {
                Ok(copy) => {
                    tracing::info!(key = %key, url = %copy.url, "Backup store write succeeded")
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "Backup store write failed")
                }
            }
        }

        // The unique index on access_token is the source of truth for
        // uniqueness; on a collision we mint a new token and retry.
        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let access_token = generate_access_token();
            let new_record = NewMediaRecord {
                file_name: upload.file_name.clone(),
                file_type: upload.content_type.clone(),
                file_size,
                blob_url: blob.url.clone(),
                blob_public_id: blob.public_id.clone(),
                access_token,
            };

            match self.record_store.insert(new_record).await {
                Ok(record) => {
                    let share_url = self.share_url(&record.access_token);
                    return Ok(RegisteredMedia { record, share_url });
                }
                Err(MediaError::TokenCollision) => {
                    tracing::warn!(attempt, "Access token collision, regenerating");
                }
                Err(err) => {
                    // Blob stays orphaned: recoverable inconsistency,
                    // no automatic rollback
                    tracing::error!(public_id = %blob.public_id, error = %err, "Failed to persist media record");
                    return Err(err);
                }
            }
        }

        Err(MediaError::TokenCollision)
    }

    /// Resolve an access token back to its record.
    pub async fn resolve(&self, token: &str) -> MediaResult<MediaRecord> {
        if token.trim().is_empty() {
            return Err(MediaError::Validation("Access token required".to_string()));
        }

        let mut matches = self.record_store.find_by_token(token).await?;
        if matches.is_empty() {
            return Err(MediaError::NotFound(format!("file for token {}", token)));
        }
        if matches.len() > 1 {
            // Never expected given the unique index; fail open on
            // read-only data and pick the earliest record
            tracing::warn!(
                token,
                count = matches.len(),
                "Duplicate access token detected, returning earliest record"
            );
        }
        let record = matches.remove(0);

        if self.config.verify_blob_on_resolve {
            match self.blob_store.exists(&record.blob_public_id).await {
                Ok(true) => {}
                Ok(false) => tracing::warn!(
                    token,
                    public_id = %record.blob_public_id,
                    "Blob missing during existence probe, returning stored record"
                ),
                Err(err) => tracing::warn!(
                    token,
                    error = %err,
                    "Blob existence probe failed, returning stored record"
                ),
            }
        }

        Ok(record)
    }

    fn share_url(&self, token: &str) -> String {
        format!(
            "{}/media/{}",
            self.config.public_base_url.trim_end_matches('/'),
            token
        )
    }
}

/// Object key for a new upload: unique prefix plus a sanitized version
/// of the client-supplied name.
fn object_key(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("media/{}/{}", Uuid::new_v4(), safe)
}

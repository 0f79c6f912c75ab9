//! Record store collaborator: keyed persistence of media metadata.

pub mod repository;

use async_trait::async_trait;
use shared::MediaResult;

use crate::models::{MediaRecord, NewMediaRecord};

pub use repository::PgRecordStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record. A duplicate access token must surface as
    /// `MediaError::TokenCollision` so the caller can regenerate.
    async fn insert(&self, record: NewMediaRecord) -> MediaResult<MediaRecord>;

    /// All records for a token, earliest first. The unique index keeps
    /// this at zero or one match; more than one is an integrity
    /// anomaly the caller resolves deterministically.
    async fn find_by_token(&self, token: &str) -> MediaResult<Vec<MediaRecord>>;
}

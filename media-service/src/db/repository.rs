use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use shared::{MediaError, MediaResult};

use crate::db::RecordStore;
use crate::models::{MediaRecord, NewMediaRecord};

/// Postgres-backed record store.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: NewMediaRecord) -> MediaResult<MediaRecord> {
        let created = sqlx::query_as::<_, MediaRecord>(
            r#"
            INSERT INTO media_records (
                id,
                file_name,
                file_type,
                file_size,
                blob_url,
                blob_public_id,
                access_token,
                uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.file_name)
        .bind(&record.file_type)
        .bind(record.file_size)
        .bind(&record.blob_url)
        .bind(&record.blob_public_id)
        .bind(&record.access_token)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(MediaError::from)?;

        tracing::info!(id = %created.id, token = %created.access_token, "Created media record");
        Ok(created)
    }

    async fn find_by_token(&self, token: &str) -> MediaResult<Vec<MediaRecord>> {
        let records = sqlx::query_as::<_, MediaRecord>(
            r#"
            SELECT * FROM media_records
            WHERE access_token = $1
            ORDER BY uploaded_at ASC
            "#,
        )
        .bind(token)
        .fetch_all(&self.pool)
        .await
        .map_err(MediaError::from)?;

        Ok(records)
    }
}

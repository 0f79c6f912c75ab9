use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The persisted metadata entity for one uploaded file.
///
/// Created exactly once by registration and read-only afterwards;
/// there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MediaRecord {
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub blob_url: String,
    pub blob_public_id: String,
    pub access_token: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// Fields the registration workflow supplies for a new record;
/// `id` and `uploaded_at` are assigned by the record store.
#[derive(Debug, Clone)]
pub struct NewMediaRecord {
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub blob_url: String,
    pub blob_public_id: String,
    pub access_token: String,
}

/// A file extracted from the upload request, before any external call.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisteredMedia {
    pub record: MediaRecord,
    pub share_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file: MediaRecord,
    #[serde(rename = "shareUrl")]
    pub share_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub file: MediaRecord,
}

/// POST resolution body; `id` carries the access token.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record() -> MediaRecord {
        MediaRecord {
            id: Uuid::new_v4(),
            file_name: "a.txt".to_string(),
            file_type: "text/plain".to_string(),
            file_size: 10,
            blob_url: "https://cdn.example/media/a.txt".to_string(),
            blob_public_id: "media/a".to_string(),
            access_token: "ab12cd34".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_upload_response_wire_shape() {
        let response = UploadResponse {
            success: true,
            file: record(),
            share_url: "https://share4.ever/media/ab12cd34".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["shareUrl"], "https://share4.ever/media/ab12cd34");
        assert_eq!(json["file"]["file_name"], "a.txt");
        assert_eq!(json["file"]["access_token"], "ab12cd34");
    }
}

use axum::{
    extract::{Multipart, State},
    Json,
};

use shared::MediaError;

use crate::handlers::AppError;
use crate::models::{UploadResponse, UploadedFile};
use crate::AppState;

/// Handle a multipart file upload and register it for sharing.
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    tracing::info!("Received upload request");

    let mut uploaded: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MediaError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|name| name.to_string())
            .unwrap_or_default();
        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| MediaError::Validation(format!("Failed to read file: {}", e)))?;

        tracing::info!(
            file_name = %file_name,
            size = data.len(),
            content_type = %content_type,
            "File received"
        );

        uploaded = Some(UploadedFile {
            file_name,
            content_type,
            data,
        });
        break;
    }

    let upload = uploaded.ok_or_else(|| MediaError::Validation("No file provided".to_string()))?;

    let registered = state.media_service.register(upload).await?;

    Ok(Json(UploadResponse {
        success: true,
        file: registered.record,
        share_url: registered.share_url,
    }))
}

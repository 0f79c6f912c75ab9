pub mod health;
pub mod media;
pub mod upload;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::MediaError;

/// Handler-level error wrapper: maps the taxonomy onto HTTP responses
/// with a stable JSON body, logging 5xx detail while keeping the
/// client-facing message generic.
#[derive(Debug)]
pub struct AppError(pub MediaError);

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            match self.0 {
                MediaError::UpstreamStorage(_) | MediaError::Timeout(_) => {
                    "Failed to store file".to_string()
                }
                MediaError::MetadataPersist(_) => "Failed to save file metadata".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.0.to_string()
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (MediaError::Validation("missing".to_string()), StatusCode::BAD_REQUEST),
            (MediaError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (
                MediaError::PayloadTooLarge("x".to_string()),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                MediaError::UpstreamStorage("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                MediaError::MetadataPersist("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError(err).into_response().status(), expected);
        }
    }
}

//! Common error taxonomy for the Media2Link backend

use thiserror::Error;

/// Result type used across the workflow layers
pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Blob storage error: {0}")]
    UpstreamStorage(String),

    #[error("Failed to persist metadata: {0}")]
    MetadataPersist(String),

    #[error("Access token collision")]
    TokenCollision,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediaError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            MediaError::Validation(_) => 400,
            MediaError::PayloadTooLarge(_) => 413,
            MediaError::NotFound(_) => 404,
            MediaError::Timeout(_) => 504,
            _ => 500,
        }
    }

    /// Whether the caller may retry the same request unchanged.
    ///
    /// `TokenCollision` is retryable at the store layer only: the
    /// registration workflow consumes it in its regenerate-and-retry
    /// loop and it should never reach a client under normal operation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MediaError::Timeout(_)
                | MediaError::UpstreamStorage(_)
                | MediaError::TokenCollision
        )
    }
}

impl From<sqlx::Error> for MediaError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => MediaError::TokenCollision,
            _ => MediaError::MetadataPersist(err.to_string()),
        }
    }
}

impl From<std::io::Error> for MediaError {
    fn from(err: std::io::Error) -> Self {
        MediaError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(MediaError::NotFound("test".to_string()).http_status_code(), 404);
        assert_eq!(MediaError::Validation("test".to_string()).http_status_code(), 400);
        assert_eq!(MediaError::PayloadTooLarge("test".to_string()).http_status_code(), 413);
        assert_eq!(MediaError::Timeout("test".to_string()).http_status_code(), 504);
        assert_eq!(MediaError::UpstreamStorage("test".to_string()).http_status_code(), 500);
        assert_eq!(MediaError::MetadataPersist("test".to_string()).http_status_code(), 500);
    }

    #[test]
    fn test_retryable() {
        assert!(MediaError::Timeout("test".to_string()).is_retryable());
        assert!(MediaError::UpstreamStorage("test".to_string()).is_retryable());
        assert!(MediaError::TokenCollision.is_retryable());
        assert!(!MediaError::Validation("test".to_string()).is_retryable());
        assert!(!MediaError::NotFound("test".to_string()).is_retryable());
    }
}

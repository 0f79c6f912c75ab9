//! Cloudinary blob store adapter.
//!
//! Uploads through the unsigned REST endpoint with a configured upload
//! preset. Existence checks probe the public delivery URL and are
//! best-effort only.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use shared::{MediaError, MediaResult};

use crate::config::CloudinaryConfig;
use crate::storage::{BlobStore, StoredBlob};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub struct CloudinaryBlobStore {
    http: reqwest::Client,
    cloud_name: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    public_id: String,
    secure_url: String,
}

impl CloudinaryBlobStore {
    pub fn new(config: &CloudinaryConfig) -> MediaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| MediaError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            cloud_name: config.cloud_name.clone(),
            upload_preset: config.upload_preset.clone(),
        })
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/auto/upload",
            self.cloud_name
        )
    }

    fn delivery_url(&self, public_id: &str) -> String {
        format!(
            "https://res.cloudinary.com/{}/image/upload/{}",
            self.cloud_name, public_id
        )
    }

    fn map_transport_error(err: reqwest::Error) -> MediaError {
        if err.is_timeout() {
            MediaError::Timeout(err.to_string())
        } else {
            MediaError::UpstreamStorage(err.to_string())
        }
    }
}

#[async_trait]
impl BlobStore for CloudinaryBlobStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> MediaResult<StoredBlob> {
        let mut part = reqwest::multipart::Part::bytes(data.to_vec()).file_name(key.to_string());
        if let Some(ct) = content_type {
            part = part
                .mime_str(ct)
                .map_err(|e| MediaError::Validation(format!("Invalid content type: {}", e)))?;
        }

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .http
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, detail, "Cloudinary upload rejected");
            return Err(MediaError::UpstreamStorage(format!(
                "Cloudinary upload failed with status {}",
                status
            )));
        }

        let uploaded: CloudinaryUploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::UpstreamStorage(format!("Malformed upload response: {}", e)))?;

        tracing::info!(public_id = %uploaded.public_id, "Stored blob in Cloudinary");

        Ok(StoredBlob {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn exists(&self, public_id: &str) -> MediaResult<bool> {
        let response = self
            .http
            .head(self.delivery_url(public_id))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        Ok(response.status().is_success())
    }
}

//! S3/MinIO blob store adapter.

use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use shared::{MediaError, MediaResult};

use crate::config::S3Config;
use crate::storage::{BlobStore, StoredBlob};

pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    pub async fn new(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if config.force_path_style {
            // MinIO and most self-hosted gateways require path-style addressing
            builder = builder.force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> MediaResult<StoredBlob> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type.map(|ct| ct.to_string()))
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| MediaError::UpstreamStorage(e.to_string()))?;

        tracing::info!(bucket = %self.bucket, key, size, "Stored blob in S3");

        Ok(StoredBlob {
            url: self.public_url(key),
            public_id: key.to_string(),
        })
    }

    async fn exists(&self, public_id: &str) -> MediaResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(public_id)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(MediaError::UpstreamStorage(service_err.to_string()))
                }
            }
        }
    }
}

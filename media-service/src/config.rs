use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub limits: LimitsConfig,
    /// Origin used to compose shareable `/media/{token}` links
    pub public_base_url: String,
    /// Probe the blob store for the stored object during resolution
    pub verify_blob_on_resolve: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    S3,
    Cloudinary,
}

impl StorageProvider {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "s3" => Ok(StorageProvider::S3),
            "cloudinary" => Ok(StorageProvider::Cloudinary),
            other => anyhow::bail!("Unknown storage provider: {}", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    /// Optional explicit replication target; its write outcome is
    /// reported per upload, never silently swallowed.
    pub backup_provider: Option<StorageProvider>,
    pub s3: Option<S3Config>,
    pub cloudinary: Option<CloudinaryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub force_path_style: bool,
    /// Base under which bucket objects are publicly reachable
    pub public_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_file_size_bytes: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let provider = StorageProvider::parse(
            &std::env::var("STORAGE_PROVIDER").unwrap_or_else(|_| "s3".to_string()),
        )?;
        let backup_provider = match std::env::var("STORAGE_BACKUP_PROVIDER") {
            Ok(value) => Some(StorageProvider::parse(&value)?),
            Err(_) => None,
        };

        let s3 = match std::env::var("S3_BUCKET") {
            Ok(bucket) => Some(S3Config {
                bucket,
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                endpoint: std::env::var("S3_ENDPOINT").ok(),
                force_path_style: std::env::var("S3_FORCE_PATH_STYLE")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
                public_base_url: std::env::var("S3_PUBLIC_BASE_URL")?,
            }),
            Err(_) => None,
        };

        let cloudinary = match std::env::var("CLOUDINARY_CLOUD_NAME") {
            Ok(cloud_name) => Some(CloudinaryConfig {
                cloud_name,
                upload_preset: std::env::var("CLOUDINARY_UPLOAD_PRESET")
                    .unwrap_or_else(|_| "ml_default".to_string()),
            }),
            Err(_) => None,
        };

        Ok(Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8086".to_string())
                    .parse()?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")?,
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
            storage: StorageConfig {
                provider,
                backup_provider,
                s3,
                cloudinary,
            },
            limits: LimitsConfig {
                max_file_size_bytes: match std::env::var("MAX_FILE_SIZE_BYTES") {
                    Ok(value) => Some(value.parse()?),
                    Err(_) => None,
                },
            },
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8086".to_string()),
            verify_blob_on_resolve: std::env::var("VERIFY_BLOB_ON_RESOLVE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_parse() {
        assert_eq!(StorageProvider::parse("s3").unwrap(), StorageProvider::S3);
        assert_eq!(
            StorageProvider::parse("Cloudinary").unwrap(),
            StorageProvider::Cloudinary
        );
        assert!(StorageProvider::parse("ftp").is_err());
    }
}

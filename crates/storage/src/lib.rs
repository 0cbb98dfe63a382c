//! Scribe Object Storage
//!
//! Stores uploaded media as publicly readable objects and hands back the
//! CDN URL they are served from:
//! - AWS S3 integration for production
//! - In-memory store for testing and development
//! - LocalStack integration for local E2E testing

use std::sync::Arc;

use thiserror::Error;

pub mod mock;
pub mod s3;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage configuration error: {0}")]
    Configuration(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider (s3, mock)
    pub provider: String,
    /// AWS region for S3
    pub aws_region: Option<String>,
    /// AWS endpoint URL (for LocalStack)
    pub aws_endpoint_url: Option<String>,
    /// Bucket receiving uploads
    pub bucket: String,
    /// Public base URL objects are served from
    pub cdn_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            aws_region: None,
            aws_endpoint_url: None,
            bucket: "scribe-media".to_string(),
            cdn_base_url: "http://localhost:4566/scribe-media".to_string(),
        }
    }
}

impl StorageConfig {
    /// Create storage config from environment variables
    pub fn from_env() -> Result<Self, StorageError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let provider = std::env::var("STORAGE_PROVIDER").unwrap_or(defaults.provider);
        let bucket = std::env::var("S3_BUCKET").unwrap_or(defaults.bucket);
        let cdn_base_url = std::env::var("CDN_BASE_URL").unwrap_or(defaults.cdn_base_url);

        if provider == "s3" && bucket.is_empty() {
            return Err(StorageError::Configuration(
                "S3_BUCKET must be set for the s3 provider".to_string(),
            ));
        }

        Ok(Self {
            provider,
            aws_region: std::env::var("AWS_REGION").ok(),
            aws_endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            bucket,
            cdn_base_url,
        })
    }

    /// URL an object with `key` is served from
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.cdn_base_url.trim_end_matches('/'), key)
    }
}

/// Reject keys that are empty or could escape the bucket root
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey("file name is empty".to_string()));
    }
    if key.starts_with('/') || key.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Public object store
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key` with public-read access
    async fn put_public(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// URL the object under `key` is served from
    fn public_url(&self, key: &str) -> String;

    /// Validate the key, store the object and return its public URL
    async fn upload(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_key(key)?;
        self.put_public(key, body, content_type).await?;
        Ok(self.public_url(key))
    }
}

/// Object store factory
pub struct ObjectStoreFactory;

impl ObjectStoreFactory {
    /// Create an object store based on configuration
    pub async fn create(config: StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
        match config.provider.as_str() {
            "s3" => {
                tracing::info!(bucket = %config.bucket, "Creating S3 object store");
                Ok(Arc::new(s3::S3ObjectStore::new(config).await))
            }
            "mock" => {
                tracing::info!("Creating in-memory object store");
                Ok(Arc::new(mock::MockObjectStore::new(config)))
            }
            provider => Err(StorageError::Configuration(format!(
                "Unknown storage provider: {}. Supported providers: s3, mock",
                provider
            ))),
        }
    }
}

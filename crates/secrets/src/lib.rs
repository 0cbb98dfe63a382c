//! Scribe Secret Provider
//!
//! Named secret bundles (JWT signing key, OAuth client credentials, email
//! addresses) are fetched on demand and never cached:
//! - AWS Secrets Manager for deployed environments
//! - In-memory provider for tests and local development

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

pub mod aws;
pub mod mock;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SecretError {
    #[error("Secret provider configuration error: {0}")]
    Configuration(String),

    #[error("Secret {0} could not be decrypted")]
    DecryptionFailure(String),

    #[error("Secret store internal error for {0}")]
    InternalServiceError(String),

    #[error("Invalid parameter requesting secret {0}")]
    InvalidParameter(String),

    #[error("Invalid request for secret {0}")]
    InvalidRequest(String),

    #[error("Secret {0} not found")]
    NotFound(String),

    #[error("Secret {secret} is not a JSON object: {reason}")]
    Malformed { secret: String, reason: String },

    #[error("Secret {secret} has no entry named {key}")]
    MissingKey { secret: String, key: String },
}

/// Key/value pairs stored under a single secret name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecretBundle {
    name: String,
    values: HashMap<String, String>,
}

impl SecretBundle {
    pub fn new(name: impl Into<String>, values: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// An empty bundle. Stands in for "no secret" when the store fails softly.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, HashMap::new())
    }

    /// Parse a secret string holding a flat JSON object.
    ///
    /// Non-string values are kept in their JSON text form.
    pub fn from_json(name: &str, raw: &str) -> Result<Self, SecretError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| SecretError::Malformed {
                secret: name.to_string(),
                reason: e.to_string(),
            })?;

        let object = value.as_object().ok_or_else(|| SecretError::Malformed {
            secret: name.to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        let values = object
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect();

        Ok(Self::new(name, values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a required entry. Missing and empty values are both errors.
    pub fn require(&self, key: &str) -> Result<&str, SecretError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(SecretError::MissingKey {
                secret: self.name.clone(),
                key: key.to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Secret provider configuration
#[derive(Debug, Clone)]
pub struct SecretsConfig {
    /// Provider (aws, static)
    pub provider: String,
    /// AWS region for Secrets Manager
    pub aws_region: Option<String>,
    /// AWS endpoint URL (for LocalStack)
    pub aws_endpoint_url: Option<String>,
    /// JSON object of secret name -> bundle, used by the static provider
    pub static_secrets: Option<String>,
}

impl SecretsConfig {
    /// Create secrets config from environment variables
    pub fn from_env() -> Result<Self, SecretError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            provider: std::env::var("SECRETS_PROVIDER").unwrap_or_else(|_| "aws".to_string()),
            aws_region: std::env::var("AWS_REGION").ok(),
            aws_endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            static_secrets: std::env::var("STATIC_SECRETS").ok(),
        })
    }
}

/// Source of named secret bundles
#[async_trait::async_trait]
pub trait SecretProvider: Send + Sync {
    /// Fetch the bundle stored under `name`
    async fn get_secret(&self, name: &str) -> Result<SecretBundle, SecretError>;
}

/// Secret provider factory
pub struct SecretProviderFactory;

impl SecretProviderFactory {
    /// Create a secret provider based on configuration
    pub async fn create(config: SecretsConfig) -> Result<Arc<dyn SecretProvider>, SecretError> {
        match config.provider.as_str() {
            "aws" | "secretsmanager" => {
                tracing::info!("Creating AWS Secrets Manager provider");
                Ok(Arc::new(aws::AwsSecretProvider::new(config).await))
            }
            "static" => {
                tracing::info!("Creating static secret provider");
                let raw = config.static_secrets.as_deref().ok_or_else(|| {
                    SecretError::Configuration(
                        "STATIC_SECRETS is required for the static provider".to_string(),
                    )
                })?;
                Ok(Arc::new(mock::MockSecretProvider::from_json(raw)?))
            }
            provider => Err(SecretError::Configuration(format!(
                "Unknown secrets provider: {}. Supported providers: aws, static",
                provider
            ))),
        }
    }
}

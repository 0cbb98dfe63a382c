//! AWS Secrets Manager provider
//!
//! Store errors that identify a caller or configuration problem are
//! propagated; anything else (throttling, transport, dispatch) is logged
//! and reported as an empty bundle so callers hit `MissingKey` instead.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_secretsmanager::config::SharedCredentialsProvider;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;

use crate::{SecretBundle, SecretError, SecretProvider, SecretsConfig};

/// Secret provider backed by AWS Secrets Manager
pub struct AwsSecretProvider {
    client: SecretsManagerClient,
}

impl AwsSecretProvider {
    /// Create a new Secrets Manager provider
    pub async fn new(config: SecretsConfig) -> Self {
        let region = config
            .aws_region
            .clone()
            .unwrap_or_else(|| "us-east-1".to_string());

        let aws_config = match config.aws_endpoint_url.as_ref() {
            Some(endpoint_url) => {
                tracing::info!("Using custom AWS endpoint: {}", endpoint_url);

                // For LocalStack, use dummy credentials
                let credentials = Credentials::new(
                    "test-access-key",
                    "test-secret-key",
                    None,
                    None,
                    "localstack-secrets-provider",
                );

                aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region))
                    .endpoint_url(endpoint_url)
                    .credentials_provider(SharedCredentialsProvider::new(credentials))
                    .load()
                    .await
            }
            None => {
                aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region))
                    .load()
                    .await
            }
        };

        Self {
            client: SecretsManagerClient::new(&aws_config),
        }
    }
}

/// Map a Secrets Manager error onto the propagated categories.
///
/// Returns `None` for failures that are swallowed.
fn classify(name: &str, err: &GetSecretValueError) -> Option<SecretError> {
    let name = name.to_string();
    if err.is_decryption_failure() {
        Some(SecretError::DecryptionFailure(name))
    } else if err.is_internal_service_error() {
        Some(SecretError::InternalServiceError(name))
    } else if err.is_invalid_parameter_exception() {
        Some(SecretError::InvalidParameter(name))
    } else if err.is_invalid_request_exception() {
        Some(SecretError::InvalidRequest(name))
    } else if err.is_resource_not_found_exception() {
        Some(SecretError::NotFound(name))
    } else {
        None
    }
}

#[async_trait::async_trait]
impl SecretProvider for AwsSecretProvider {
    async fn get_secret(&self, name: &str) -> Result<SecretBundle, SecretError> {
        tracing::debug!(secret = %name, "Fetching secret from AWS Secrets Manager");

        let output = match self.client.get_secret_value().secret_id(name).send().await {
            Ok(output) => output,
            Err(e) => {
                let service_error = e.into_service_error();
                if let Some(err) = classify(name, &service_error) {
                    tracing::error!(secret = %name, error = %service_error, "Secret fetch failed");
                    return Err(err);
                }
                tracing::warn!(
                    secret = %name,
                    error = %service_error,
                    "Secret fetch failed, treating as empty"
                );
                return Ok(SecretBundle::empty(name));
            }
        };

        match output.secret_string() {
            Some(raw) => SecretBundle::from_json(name, raw),
            None => {
                tracing::warn!(secret = %name, "Secret has no string value");
                Ok(SecretBundle::empty(name))
            }
        }
    }
}

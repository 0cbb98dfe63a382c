//! Token issuance and verification
//!
//! The signing key is fetched from the secret provider on every call, so a
//! rotated key takes effect immediately and an unavailable secret store
//! fails the request instead of falling back to a stale key.

use std::sync::Arc;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use scribe_secrets::SecretProvider;

use crate::claims::{AuthPayload, AuthUser, SignedClaims, TokenClaims};
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Entry of the JWT secret bundle holding the HMAC key
const SIGNING_KEY_ENTRY: &str = "privateKey";

/// HS256 token codec backed by the secret provider
#[derive(Clone)]
pub struct TokenCodec {
    secrets: Arc<dyn SecretProvider>,
    config: AuthConfig,
}

impl TokenCodec {
    pub fn new(secrets: Arc<dyn SecretProvider>, config: AuthConfig) -> Self {
        Self { secrets, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    async fn signing_key(&self) -> Result<String, AuthError> {
        let bundle = self
            .secrets
            .get_secret(&self.config.jwt_secret_name)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch JWT signing key");
                AuthError::SecretUnavailable(e)
            })?;

        Ok(bundle.require(SIGNING_KEY_ENTRY)?.to_string())
    }

    /// Sign `claims` into a fresh token
    pub async fn issue(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let key = self.signing_key().await?;

        let now = chrono::Utc::now().timestamp();
        let signed = SignedClaims {
            claims: claims.clone(),
            iat: now,
            exp: now + self.config.token_ttl_secs,
            iss: self.config.issuer.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &signed,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to encode JWT");
            AuthError::TokenEncoding
        })
    }

    /// Sign `claims` and wrap the token with the public user view
    pub async fn issue_payload(&self, claims: &TokenClaims) -> Result<AuthPayload, AuthError> {
        let token = self.issue(claims).await?;
        Ok(AuthPayload {
            token,
            user: AuthUser::from(claims),
        })
    }

    /// Check signature, issuer and expiry, returning the embedded claims
    pub async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let key = self.signing_key().await?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_aud = false;
        validation.leeway = 0;

        let data = decode::<SignedClaims>(
            token,
            &DecodingKey::from_secret(key.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(data.claims.claims)
    }
}

//! Password login for admin accounts

use std::sync::Arc;

use uuid::Uuid;

use crate::claims::{AuthPayload, LogoutPayload, TokenClaims};
use crate::codec::TokenCodec;
use crate::directory::AdminDirectory;
use crate::error::AuthError;
use crate::password::verify_password;
use crate::types::AdminProfile;

/// Validates admin credentials and issues admin tokens
#[derive(Clone)]
pub struct CredentialVerifier {
    admins: Arc<dyn AdminDirectory>,
    codec: TokenCodec,
}

impl CredentialVerifier {
    pub fn new(admins: Arc<dyn AdminDirectory>, codec: TokenCodec) -> Self {
        Self { admins, codec }
    }

    /// Check `username`/`password` and issue an admin token.
    ///
    /// Empty input is rejected before the directory or secret store is
    /// touched. A correct password on a non-admin account still fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let account = self
            .admins
            .find_admin(username)
            .await
            .map_err(AuthError::DirectoryUnavailable)?
            .ok_or_else(|| {
                tracing::info!(username = %username, "Login attempt for unknown user");
                AuthError::UnknownUser
            })?;

        if !verify_password(&account.password_hash, password) || !account.is_admin {
            tracing::info!(username = %username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let payload = self
            .codec
            .issue_payload(&TokenClaims::admin(account.username, account.uuid))
            .await?;

        tracing::info!(user_uuid = %account.uuid, "Admin logged in");
        Ok(payload)
    }

    /// Sessions live only in the token, so logout just tells the client to drop it
    pub fn logout(&self) -> LogoutPayload {
        LogoutPayload {
            auth: false,
            token: None,
        }
    }

    /// Profile of the admin identified by `uuid`
    pub async fn me(&self, uuid: Uuid) -> Result<AdminProfile, AuthError> {
        self.admins
            .find_admin_by_uuid(uuid)
            .await
            .map_err(AuthError::DirectoryUnavailable)?
            .map(AdminProfile::from)
            .ok_or(AuthError::UnknownUser)
    }
}

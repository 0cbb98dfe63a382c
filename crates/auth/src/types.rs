//! Identity read-model types
//!
//! Lightweight views of the `users` and `visitors` rows owned by the blog
//! domain, carrying only what login and authorization need.

use serde::Serialize;
use uuid::Uuid;

/// Admin account as seen by the credential verifier
#[derive(Clone, sqlx::FromRow)]
pub struct AdminAccount {
    pub uuid: Uuid,
    pub username: String,
    /// argon2 PHC string
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub is_admin: bool,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("uuid", &self.uuid)
            .field("username", &self.username)
            .field("is_admin", &self.is_admin)
            .finish_non_exhaustive()
    }
}

/// Admin profile returned by `GET /v1/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub uuid: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub role: &'static str,
}

impl From<AdminAccount> for AdminProfile {
    fn from(account: AdminAccount) -> Self {
        Self {
            uuid: account.uuid,
            username: account.username,
            is_admin: account.is_admin,
            role: "admin",
        }
    }
}

/// Visitor identity as seen by OAuth resolution
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VisitorIdentity {
    pub uuid: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

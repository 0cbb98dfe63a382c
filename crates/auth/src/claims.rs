//! Token claims and login payload types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity carried inside every bearer token.
///
/// This is the whole session: nothing about it is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// GitHub access token for visitors, so later provider calls skip re-auth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub username: String,
    pub uuid: Uuid,
}

impl TokenClaims {
    /// Claims for an admin who logged in with a password
    pub fn admin(username: impl Into<String>, uuid: Uuid) -> Self {
        Self {
            access_token: None,
            avatar_url: None,
            is_admin: true,
            username: username.into(),
            uuid,
        }
    }

    /// Claims for a visitor who logged in through GitHub
    pub fn visitor(
        username: impl Into<String>,
        uuid: Uuid,
        avatar_url: Option<String>,
        access_token: String,
    ) -> Self {
        Self {
            access_token: Some(access_token),
            avatar_url,
            is_admin: false,
            username: username.into(),
            uuid,
        }
    }

    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::Visitor
        }
    }
}

/// Claims as they are signed: identity plus registered JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SignedClaims {
    #[serde(flatten)]
    pub claims: TokenClaims,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    /// Random per-token id; renewed tokens never repeat earlier bytes
    pub jti: String,
}

/// The only two roles there are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Visitor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Visitor => write!(f, "visitor"),
        }
    }
}

/// Public view of the logged-in principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub avatar_url: Option<String>,
    pub role: Role,
    pub username: String,
    pub uuid: Uuid,
}

impl From<&TokenClaims> for AuthUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            avatar_url: claims.avatar_url.clone(),
            role: claims.role(),
            username: claims.username.clone(),
            uuid: claims.uuid,
        }
    }
}

/// Response body of every successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: AuthUser,
}

/// Response body of logout; there is no server-side session to drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutPayload {
    pub auth: bool,
    pub token: Option<String>,
}

//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scribe_common::RepositoryError;
use scribe_secrets::SecretError;
use serde_json::json;

/// GitHub login failure, named after the step that failed
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("authorization code is required")]
    MissingCode,

    #[error("OAuth client credentials unavailable: {0}")]
    Credentials(#[source] SecretError),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("provider returned no access token")]
    MissingAccessToken,

    #[error("profile lookup failed: {0}")]
    Profile(String),

    #[error("visitor lookup failed: {0}")]
    IdentityLookup(#[source] RepositoryError),

    #[error("token issuance failed: {0}")]
    TokenIssue(String),
}

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username and password are required")]
    MissingCredentials,

    #[error("unknown user")]
    UnknownUser,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authorization header required")]
    MissingAuthorization,

    #[error("invalid authorization header format")]
    InvalidAuthorizationFormat,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("admin role required")]
    AdminRequired,

    #[error("caller does not own the comment")]
    NotCommentOwner,

    #[error("GitHub login failed: {0}")]
    OAuth(#[from] OAuthError),

    #[error("secret unavailable: {0}")]
    SecretUnavailable(#[from] SecretError),

    #[error("identity directory unavailable: {0}")]
    DirectoryUnavailable(#[source] RepositoryError),

    #[error("token encoding failed")]
    TokenEncoding,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials | AuthError::OAuth(_) => StatusCode::BAD_REQUEST,
            AuthError::UnknownUser
            | AuthError::InvalidCredentials
            | AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::AdminRequired
            | AuthError::NotCommentOwner => StatusCode::UNAUTHORIZED,
            AuthError::SecretUnavailable(_)
            | AuthError::DirectoryUnavailable(_)
            | AuthError::TokenEncoding => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::UnknownUser | AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::MissingAuthorization => "MISSING_AUTHORIZATION",
            AuthError::InvalidAuthorizationFormat => "INVALID_AUTHORIZATION",
            AuthError::InvalidToken | AuthError::TokenExpired => "INVALID_TOKEN",
            AuthError::AdminRequired => "ADMIN_REQUIRED",
            AuthError::NotCommentOwner => "NOT_COMMENT_OWNER",
            AuthError::OAuth(_) => "OAUTH_FAILED",
            AuthError::SecretUnavailable(_) => "SECRET_UNAVAILABLE",
            AuthError::DirectoryUnavailable(_) => "DIRECTORY_UNAVAILABLE",
            AuthError::TokenEncoding => "AUTH_ERROR",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Unknown user and wrong password look identical to the caller
        let message = match &self {
            AuthError::UnknownUser | AuthError::InvalidCredentials => {
                "Invalid username or password".to_string()
            }
            e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %e, "Authentication failed");
                "Authentication failed".to_string()
            }
            e => e.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

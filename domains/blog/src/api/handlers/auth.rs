//! Login, logout and GitHub OAuth handlers

use axum::{extract::State, Json};
use scribe_auth::{AdminProfile, AdminSession, AuthError, AuthPayload, LogoutPayload, Session};
use serde::Deserialize;

use crate::api::middleware::BlogState;

/// Admin login form; missing fields are treated as empty
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GitHub authorization code handed back by the OAuth redirect
#[derive(Debug, Deserialize)]
pub struct OAuthRequest {
    #[serde(default, alias = "code")]
    pub token: String,
}

/// Log an admin in with username and password
///
/// **POST /v1/auth/login**
pub async fn login(
    State(state): State<BlogState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthPayload>, AuthError> {
    let payload = state
        .credentials
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(payload))
}

/// End the session; the client drops its token
///
/// **GET /v1/auth/logout**
pub async fn logout(Session(claims): Session, State(state): State<BlogState>) -> Json<LogoutPayload> {
    tracing::info!(user_uuid = %claims.uuid, "Logout");
    Json(state.credentials.logout())
}

/// Profile of the logged-in admin
///
/// **GET /v1/auth/me**
pub async fn me(
    AdminSession(claims): AdminSession,
    State(state): State<BlogState>,
) -> Result<Json<AdminProfile>, AuthError> {
    let profile = state.credentials.me(claims.uuid).await?;
    Ok(Json(profile))
}

/// Exchange a GitHub authorization code for a visitor session
///
/// **POST /v1/oauth**
pub async fn login_with_github(
    State(state): State<BlogState>,
    Json(request): Json<OAuthRequest>,
) -> Result<Json<AuthPayload>, AuthError> {
    let payload = state.oauth.login_with_github(&request.token).await?;
    Ok(Json(payload))
}

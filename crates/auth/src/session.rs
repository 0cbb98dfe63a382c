//! Sliding-session middleware and route gates
//!
//! `authenticate` decodes the bearer token, re-issues a fresh token on the
//! `token` response header and stores the claims in request extensions.
//! The gates run after it and only read those claims.
//!
//! ```ignore
//! Router::new()
//!     .route("/v1/posts/{post_uuid}", delete(delete_post))
//!     .route_layer(from_fn(require_admin))
//!     .route_layer(from_fn_with_state(auth.clone(), authenticate))
//! ```

use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::AuthBackend;
use crate::claims::TokenClaims;
use crate::error::AuthError;

/// Response header carrying the renewed token
pub const TOKEN_HEADER: HeaderName = HeaderName::from_static("token");

/// Path parameter naming the comment checked by [`require_comment_owner`]
pub const COMMENT_UUID_PARAM: &str = "comment_uuid";

/// Extract the token from a `bearer <token>` Authorization header.
///
/// The scheme is matched case-insensitively.
pub fn extract_bearer_token(header: &HeaderValue) -> Result<&str, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    let (scheme, token) = header_str
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthorizationFormat)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::InvalidAuthorizationFormat);
    }

    Ok(token)
}

/// Decode the bearer token, renew it and expose its claims to handlers
pub async fn authenticate(
    State(backend): State<AuthBackend>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?;
    let token = extract_bearer_token(header)?;

    let claims = backend.codec().verify(token).await?;
    let renewed = backend.codec().issue(&claims).await?;
    let renewed = HeaderValue::from_str(&renewed).map_err(|_| AuthError::TokenEncoding)?;

    tracing::debug!(user_uuid = %claims.uuid, role = %claims.role(), "Session renewed");
    request.extensions_mut().insert(claims);

    let mut response = next.run(request).await;
    response.headers_mut().insert(TOKEN_HEADER, renewed);
    Ok(response)
}

/// Reject callers whose claims are not admin
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AuthError> {
    let claims = request
        .extensions()
        .get::<TokenClaims>()
        .ok_or(AuthError::MissingAuthorization)?;

    if !claims.is_admin {
        tracing::info!(user_uuid = %claims.uuid, "Admin route refused");
        return Err(AuthError::AdminRequired);
    }

    Ok(next.run(request).await)
}

/// Let admins through; otherwise the caller must have authored the comment.
///
/// A failed lookup denies the request just like a mismatch does.
pub async fn require_comment_owner(
    State(backend): State<AuthBackend>,
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = request
        .extensions()
        .get::<TokenClaims>()
        .ok_or(AuthError::MissingAuthorization)?;

    if claims.is_admin {
        return Ok(next.run(request).await);
    }

    let comment_uuid = params
        .get(COMMENT_UUID_PARAM)
        .and_then(|raw| Uuid::parse_str(raw).ok());

    let is_owner = match comment_uuid {
        Some(comment_uuid) => match backend.visitors().visitor_comment_uuids(claims.uuid).await {
            Ok(owned) => owned.contains(&comment_uuid),
            Err(e) => {
                tracing::info!(error = %e, user_uuid = %claims.uuid, "Comment ownership lookup failed");
                false
            }
        },
        None => false,
    };

    if !is_owner {
        return Err(AuthError::NotCommentOwner);
    }

    Ok(next.run(request).await)
}

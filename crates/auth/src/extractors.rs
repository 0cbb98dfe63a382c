//! Axum extractors for authenticated handlers
//!
//! They read the claims that [`crate::authenticate`] stored in request
//! extensions, so they only succeed on routes layered with it.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::claims::TokenClaims;
use crate::error::AuthError;

/// Claims of the caller's current session
#[derive(Debug, Clone)]
pub struct Session(pub TokenClaims);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(Session)
            .ok_or(AuthError::MissingAuthorization)
    }
}

/// Session that must belong to an admin.
///
/// Like `Session` but rejects visitors with 401.
#[derive(Debug, Clone)]
pub struct AdminSession(pub TokenClaims);

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Session(claims) = Session::from_request_parts(parts, state).await?;

        if !claims.is_admin {
            return Err(AuthError::AdminRequired);
        }

        Ok(AdminSession(claims))
    }
}

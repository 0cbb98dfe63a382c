//! Blog domain state and auth backend integration

use crate::BlogRepositories;
use axum::extract::FromRef;
use scribe_auth::{AuthBackend, CredentialVerifier, GithubOAuth};
use scribe_email::ContactMailer;
use scribe_storage::ObjectStore;
use std::sync::Arc;

/// Application state for the blog domain.
///
/// Every service is built once by the composition root and shared by clone.
#[derive(Clone)]
pub struct BlogState {
    pub repos: BlogRepositories,
    pub auth: AuthBackend,
    pub credentials: CredentialVerifier,
    pub oauth: GithubOAuth,
    pub mailer: ContactMailer,
    pub storage: Arc<dyn ObjectStore>,
}

impl FromRef<BlogState> for AuthBackend {
    fn from_ref(state: &BlogState) -> Self {
        state.auth.clone()
    }
}

//! Concrete authentication backend
//!
//! Bundles what the session middleware needs per request: the token codec
//! and the visitor directory for ownership checks.

use std::sync::Arc;

use crate::codec::TokenCodec;
use crate::directory::VisitorDirectory;

/// Per-request authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    codec: TokenCodec,
    visitors: Arc<dyn VisitorDirectory>,
}

impl AuthBackend {
    pub fn new(codec: TokenCodec, visitors: Arc<dyn VisitorDirectory>) -> Self {
        Self { codec, visitors }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn visitors(&self) -> &Arc<dyn VisitorDirectory> {
        &self.visitors
    }
}

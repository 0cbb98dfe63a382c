//! Authentication for the Scribe blog API
//!
//! Stateless bearer tokens signed with a key from the secret store, admin
//! password login, GitHub OAuth for visitors, and the sliding-session
//! middleware that renews the token on every authorized request.

mod backend;
mod claims;
mod codec;
mod config;
mod credentials;
mod directory;
mod error;
mod extractors;
pub mod mock;
mod oauth;
mod password;
mod postgres;
mod session;
mod types;

pub use backend::AuthBackend;
pub use claims::{AuthPayload, AuthUser, LogoutPayload, Role, TokenClaims};
pub use codec::TokenCodec;
pub use config::{AuthConfig, GithubConfig};
pub use credentials::CredentialVerifier;
pub use directory::{AdminDirectory, VisitorDirectory};
pub use error::{AuthError, OAuthError};
pub use extractors::{AdminSession, Session};
pub use oauth::GithubOAuth;
pub use password::{hash_password, verify_password};
pub use postgres::PgDirectory;
pub use session::{
    authenticate, extract_bearer_token, require_admin, require_comment_owner,
    COMMENT_UUID_PARAM, TOKEN_HEADER,
};
pub use types::{AdminAccount, AdminProfile, VisitorIdentity};

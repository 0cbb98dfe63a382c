//! Scribe application composition root
//!
//! Builds every service once at startup and composes the blog router.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use scribe_auth::{
    AuthBackend, AuthConfig, CredentialVerifier, GithubConfig, GithubOAuth, PgDirectory,
    TokenCodec, TOKEN_HEADER,
};
use scribe_blog::{BlogRepositories, BlogState};
use scribe_common::Config;
use scribe_email::{ContactMailer, EmailConfig, EmailServiceFactory};
use scribe_secrets::{SecretProviderFactory, SecretsConfig};
use scribe_storage::{ObjectStoreFactory, StorageConfig};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

/// Largest request body accepted by the outer layer
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let secrets = SecretProviderFactory::create(SecretsConfig::from_env()?).await?;

    let auth_config = AuthConfig::from_env();
    tracing::info!(
        issuer = %auth_config.issuer,
        ttl_secs = auth_config.token_ttl_secs,
        "Token codec configured"
    );
    let codec = TokenCodec::new(secrets.clone(), auth_config);
    let directory = Arc::new(PgDirectory::new(pool.clone()));

    let auth = AuthBackend::new(codec.clone(), directory.clone());
    let credentials = CredentialVerifier::new(directory.clone(), codec.clone());
    let oauth = GithubOAuth::new(
        secrets.clone(),
        GithubConfig::from_env(),
        directory,
        codec,
    )?;

    let email_config = EmailConfig::from_env()?;
    let email_service = EmailServiceFactory::create(email_config.clone()).await?;
    let mailer = ContactMailer::new(email_service, secrets, email_config);

    let storage = ObjectStoreFactory::create(StorageConfig::from_env()?).await?;

    let blog_state = BlogState {
        repos: BlogRepositories::new(pool),
        auth,
        credentials,
        oauth,
        mailer,
        storage,
    };

    tracing::info!(aws_region = %config.aws_region, "Services initialized");

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Scribe API v0.0.1-SNAPSHOT" }),
        )
        .merge(scribe_blog::routes(blog_state));

    Ok(app)
}

/// Build the CORS layer from a comma-separated origin list (`*` for any).
///
/// The renewed-token header is exposed so browsers can read it.
pub fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([TOKEN_HEADER]);

    if allowed_origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Cap request bodies read by body extractors; routes may set a tighter limit
pub fn body_limit_layer() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

//! Authentication configuration

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Name of the secret bundle holding the `privateKey` signing key
    pub jwt_secret_name: String,
    /// `iss` claim written into and required from every token
    pub issuer: String,
    /// Lifetime of each issued token in seconds
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_name: "jwtKeys".to_string(),
            issuer: "jhoy blog".to_string(),
            token_ttl_secs: 3600,
        }
    }
}

impl AuthConfig {
    /// Create auth config from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            jwt_secret_name: std::env::var("JWT_SECRET_NAME")
                .unwrap_or(defaults.jwt_secret_name),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            token_ttl_secs: std::env::var("JWT_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(defaults.token_ttl_secs),
        }
    }
}

/// GitHub OAuth configuration
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Name of the secret bundle holding `gitHubClientId` / `gitHubSecretKey`
    pub secret_name: String,
    pub token_url: String,
    pub user_url: String,
    /// GitHub rejects API calls without a user agent
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            secret_name: "github".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            user_url: "https://api.github.com/user".to_string(),
            user_agent: "scribe-blog".to_string(),
        }
    }
}

impl GithubConfig {
    /// Create GitHub config from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            secret_name: std::env::var("GITHUB_SECRET_NAME").unwrap_or(defaults.secret_name),
            token_url: std::env::var("GITHUB_TOKEN_URL").unwrap_or(defaults.token_url),
            user_url: std::env::var("GITHUB_USER_URL").unwrap_or(defaults.user_url),
            user_agent: defaults.user_agent,
        }
    }
}

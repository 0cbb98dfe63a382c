//! GitHub OAuth login for visitors
//!
//! Trades an authorization code for an access token, reads the GitHub
//! profile and issues a visitor token. The visitor row itself is created
//! later, when the visitor first comments.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use scribe_secrets::SecretProvider;
use serde::Deserialize;
use uuid::Uuid;

use crate::claims::{AuthPayload, TokenClaims};
use crate::codec::TokenCodec;
use crate::config::GithubConfig;
use crate::directory::VisitorDirectory;
use crate::error::OAuthError;

const CLIENT_ID_ENTRY: &str = "gitHubClientId";
const CLIENT_SECRET_ENTRY: &str = "gitHubSecretKey";

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubProfile {
    login: String,
    avatar_url: Option<String>,
}

/// GitHub code exchanger
#[derive(Clone)]
pub struct GithubOAuth {
    http: reqwest::Client,
    secrets: Arc<dyn SecretProvider>,
    config: GithubConfig,
    visitors: Arc<dyn VisitorDirectory>,
    codec: TokenCodec,
}

impl GithubOAuth {
    pub fn new(
        secrets: Arc<dyn SecretProvider>,
        config: GithubConfig,
        visitors: Arc<dyn VisitorDirectory>,
        codec: TokenCodec,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            secrets,
            config,
            visitors,
            codec,
        })
    }

    /// Log a visitor in with a GitHub authorization code
    pub async fn login_with_github(&self, code: &str) -> Result<AuthPayload, OAuthError> {
        if code.is_empty() {
            return Err(OAuthError::MissingCode);
        }

        let bundle = self
            .secrets
            .get_secret(&self.config.secret_name)
            .await
            .map_err(OAuthError::Credentials)?;
        let client_id = bundle
            .require(CLIENT_ID_ENTRY)
            .map_err(OAuthError::Credentials)?;
        let client_secret = bundle
            .require(CLIENT_SECRET_ENTRY)
            .map_err(OAuthError::Credentials)?;

        let access_token = self
            .exchange_code(client_id, client_secret, code)
            .await?;
        let profile = self.fetch_profile(&access_token).await?;

        let uuid = match self
            .visitors
            .find_visitor(&profile.login)
            .await
            .map_err(OAuthError::IdentityLookup)?
        {
            Some(visitor) => visitor.uuid,
            None => {
                tracing::info!(username = %profile.login, "First GitHub login, minting visitor uuid");
                Uuid::new_v4()
            }
        };

        let claims = TokenClaims::visitor(profile.login, uuid, profile.avatar_url, access_token);
        let payload = self
            .codec
            .issue_payload(&claims)
            .await
            .map_err(|e| OAuthError::TokenIssue(e.to_string()))?;

        tracing::info!(visitor_uuid = %uuid, "Visitor logged in with GitHub");
        Ok(payload)
    }

    async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> Result<String, OAuthError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .query(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("code", code),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::warn!(error = %e, "GitHub token exchange failed");
                OAuthError::TokenExchange(e.to_string())
            })?;

        let body: AccessTokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;

        match body.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(token),
            None => {
                tracing::warn!(error = ?body.error, "GitHub returned no access token");
                Err(OAuthError::MissingAccessToken)
            }
        }
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<GithubProfile, OAuthError> {
        let response = self
            .http
            .get(&self.config.user_url)
            .header(AUTHORIZATION, format!("token {}", access_token))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::warn!(error = %e, "GitHub profile lookup failed");
                OAuthError::Profile(e.to_string())
            })?;

        response
            .json()
            .await
            .map_err(|e| OAuthError::Profile(e.to_string()))
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use gsc_core::{
    GscError,
    SearchAnalyticsClient,
    contracts::{AuthContext, Credentials, QueryRequest},
};
use reqwest::Url;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::contracts::{GoogleAccessToken, GoogleClaims, describe_api_error, describe_token_error};

pub const DEFAULT_API_URL: &str = "https://searchconsole.googleapis.com/webmasters/v3";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const WEBMASTERS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/webmasters.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 60 * 60;
const REFRESH_SKEW_MINUTES: i64 = 5;

/// Search Console client authenticating as a service account.
///
/// Tokens are cached per client email and refreshed lazily shortly before
/// they expire.
#[derive(Clone)]
pub struct GoogleSearchConsoleClient {
    pub api_url: String,
    pub token_url: String,
    http: reqwest::Client,
    token_state: Arc<tokio::sync::Mutex<Option<TokenState>>>,
}

struct TokenState {
    client_email: String,
    context: AuthContext,
}

impl Default for GoogleSearchConsoleClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleSearchConsoleClient {
    pub fn new() -> Self {
        Self::with_endpoints(DEFAULT_API_URL, DEFAULT_TOKEN_URL)
    }

    pub fn with_endpoints(api_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token_url: token_url.into(),
            http: reqwest::Client::new(),
            token_state: Arc::new(tokio::sync::Mutex::new(None)),
        }
    }

    pub async fn get_token(&self, credentials: &Credentials) -> Result<AuthContext, GscError> {
        let skew = Duration::minutes(REFRESH_SKEW_MINUTES);
        let now = Utc::now();

        let mut state = self.token_state.lock().await;
        if let Some(cached) = state.as_ref()
            && cached.client_email == credentials.client_email()
            && !cached.context.is_expired_at(now, skew)
        {
            tracing::debug!(expires_at = %cached.context.expires_at, "reusing cached access token");
            return Ok(cached.context.clone());
        }

        tracing::info!(client_email = credentials.client_email(), "refreshing access token");
        let context = self.fetch_new_token(credentials).await?;
        tracing::info!(expires_at = %context.expires_at, "new access token created");

        *state = Some(TokenState {
            client_email: credentials.client_email().to_string(),
            context: context.clone(),
        });
        Ok(context)
    }

    /// Signs a JWT assertion with the service-account key and exchanges it
    /// for an access token. The key is parsed before any network I/O.
    pub async fn fetch_new_token(&self, credentials: &Credentials) -> Result<AuthContext, GscError> {
        let key = jsonwebtoken::EncodingKey::from_rsa_pem(credentials.private_key().as_bytes())
            .map_err(|e| GscError::auth(format!("private key is not a usable RSA key: {e}")))?;

        let now = Utc::now();
        let claims = GoogleClaims {
            iss: credentials.client_email().to_string(),
            scope: WEBMASTERS_READONLY_SCOPE.to_owned(),
            aud: self.token_url.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let jwt = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256),
            &claims,
            &key,
        )
        .map_err(|e| GscError::auth(format!("cannot sign token assertion: {e}")))?;

        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", jwt.as_str())];
        let res = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| GscError::auth(format!("token request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| GscError::auth(format!("cannot read token response: {e}")))?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token exchange rejected");
            return Err(GscError::auth(describe_token_error(status, &body)));
        }

        let token: GoogleAccessToken = serde_json::from_str(&body)
            .map_err(|e| GscError::auth(format!("malformed token response: {e}")))?;
        let expires_at = Duration::try_seconds(token.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| GscError::auth("token response has an invalid expires_in"))?;
        Ok(AuthContext {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_at,
        })
    }

    /// `{api_url}/sites/{site_url}/searchAnalytics/query` with the site URL
    /// encoded as a single path segment.
    pub fn query_url(&self, site_url: &str) -> Result<Url, GscError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| GscError::config(format!("invalid API url '{}': {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|_| GscError::config(format!("API url '{}' cannot take a path", self.api_url)))?
            .pop_if_empty()
            .push("sites")
            .push(site_url)
            .push("searchAnalytics")
            .push("query");
        Ok(url)
    }
}

#[async_trait]
impl SearchAnalyticsClient for GoogleSearchConsoleClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthContext, GscError> {
        self.get_token(credentials).await
    }

    async fn query(&self, auth: &AuthContext, request: &QueryRequest) -> Result<Value, GscError> {
        let url = self.query_url(&request.site_url)?;
        tracing::debug!(%url, "posting search analytics query");

        let res = self
            .http
            .post(url)
            .header(AUTHORIZATION, auth.authorization_header())
            .json(request)
            .send()
            .await
            .map_err(|e| GscError::query(None, format!("request to Search Console failed: {e}")))?;

        let status = res.status();
        let code = Some(status.as_u16());
        let body = res
            .text()
            .await
            .map_err(|e| GscError::query(code, format!("cannot read response body: {e}")))?;

        if !status.is_success() {
            return Err(GscError::query(code, describe_api_error(status, &body)));
        }

        serde_json::from_str(&body)
            .map_err(|e| GscError::query(code, format!("response body is not valid JSON: {e}")))
    }
}

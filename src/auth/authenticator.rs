//! Authenticator implementation
//!
//! Applies the selected auth mode to requests and manages the private-key
//! grant's token lifecycle.

use super::types::{AuthMode, CachedToken};
use crate::error::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

/// Lifetime of a signed JWT assertion in seconds
const ASSERTION_LIFETIME_SECS: i64 = 300;

/// Applies authentication to outgoing HTTP requests
pub struct Authenticator {
    /// Selected auth mode
    mode: AuthMode,
    /// Cached access token for the private-key grant
    cached_token: RwLock<Option<CachedToken>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator for the given mode
    pub fn new(mode: AuthMode) -> Self {
        Self::with_client(mode, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(mode: AuthMode, http_client: Client) -> Self {
        Self {
            mode,
            cached_token: RwLock::new(None),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.mode {
            AuthMode::Token { token } => Ok(req.header("Authorization", format!("SSWS {token}"))),
            AuthMode::PrivateKey { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid access token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring the write lock (another task might
        // have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_access_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Sign a JWT assertion and exchange it for a scoped access token
    async fn fetch_access_token(&self) -> Result<CachedToken> {
        let AuthMode::PrivateKey {
            client_id,
            private_key,
            key_id,
            scopes,
            token_url,
        } = &self.mode
        else {
            return Err(Error::auth("token refresh requires private-key auth"));
        };

        let assertion = build_assertion(client_id, private_key, key_id.as_deref(), token_url)?;

        let form = [
            ("grant_type", "client_credentials".to_string()),
            ("scope", scopes.join(" ")),
            (
                "client_assertion_type",
                "urn:ietf:params:oauth:client-assertion-type:jwt-bearer".to_string(),
            ),
            ("client_assertion", assertion),
        ];

        debug!(%token_url, %client_id, "exchanging JWT assertion for access token");

        let response = self
            .http_client
            .post(token_url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenExchange {
                message: format!("token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }

    /// Clear the cached token (forces refresh on next use)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// The configured auth mode
    pub fn mode(&self) -> &AuthMode {
        &self.mode
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &self.mode {
            AuthMode::Token { .. } => "token",
            AuthMode::PrivateKey { .. } => "private_key",
        };
        f.debug_struct("Authenticator")
            .field("mode", &mode)
            .finish_non_exhaustive()
    }
}

/// Build the signed client-credentials assertion for the token endpoint
fn build_assertion(
    client_id: &str,
    private_key: &str,
    key_id: Option<&str>,
    token_url: &str,
) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = AssertionClaims {
        iss: client_id.to_string(),
        sub: client_id.to_string(),
        aud: token_url.to_string(),
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
        jti: format!("{client_id}-{now}"),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key_id.map(String::from);

    let encoding_key =
        EncodingKey::from_rsa_pem(private_key.as_bytes()).map_err(|e| Error::JwtGeneration {
            message: format!("invalid private key: {e}"),
        })?;

    encode(&header, &claims, &encoding_key).map_err(|e| Error::JwtGeneration {
        message: format!("failed to encode JWT: {e}"),
    })
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}

/// JWT assertion claims
#[derive(Debug, Serialize)]
struct AssertionClaims {
    iss: String,
    sub: String,
    aud: String,
    iat: i64,
    exp: i64,
    jti: String,
}

//! Auth mode selection and token cache types

use crate::config::{Credentials, ENV_ORG_URL};
use crate::error::{Error, Result};
use crate::types::{ApiVersion, OptionStringExt};
use chrono::{DateTime, Utc};

/// Read-only scopes shared by every version's table surface
const BASE_SCOPES: &[&str] = &[
    "okta.users.read",
    "okta.groups.read",
    "okta.roles.read",
    "okta.apps.read",
    "okta.policies.read",
    "okta.authorizationServers.read",
    "okta.trustedOrigins.read",
    "okta.factors.read",
];

/// Fixed read-only scope list for the resource surface a version's tables
/// need. Always a superset of the base management scopes.
pub fn scopes_for(version: ApiVersion) -> Vec<String> {
    let mut scopes: Vec<String> = BASE_SCOPES.iter().map(|s| (*s).to_string()).collect();
    match version {
        ApiVersion::V3 => scopes.push("okta.devices.read".to_string()),
        ApiVersion::V5 => scopes.push("okta.authenticators.read".to_string()),
        ApiVersion::V1 | ApiVersion::V4 => {}
    }
    scopes
}

/// How requests to the vendor API are authenticated
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// Static API token sent as `Authorization: SSWS <token>`
    Token { token: String },

    /// Service-app private key: sign a JWT assertion, exchange it at the
    /// org's token endpoint for a scoped access token
    PrivateKey {
        /// OAuth client id (also iss/sub of the assertion)
        client_id: String,
        /// PEM-encoded RSA private key
        private_key: String,
        /// Optional kid pinned into the JWT header
        key_id: Option<String>,
        /// Scopes requested in the grant
        scopes: Vec<String>,
        /// Absolute token endpoint URL
        token_url: String,
    },
}

impl AuthMode {
    /// Decide the auth mode from the resolved credential shape.
    ///
    /// Priority: token auth, then private-key auth, then ambient discovery.
    /// Ambient discovery is the `OKTA_CLIENT_*` environment chain, which
    /// credential resolution has already folded in, so reaching it with
    /// nothing usable is an authentication error.
    pub fn select(creds: &Credentials, version: ApiVersion, base_url: &str) -> Result<AuthMode> {
        if creds.has_token_auth() {
            return Ok(AuthMode::Token {
                token: creds.token.clone(),
            });
        }

        if creds.has_private_key_auth() {
            return Ok(AuthMode::PrivateKey {
                client_id: creds.client_id.clone(),
                private_key: creds.private_key.clone(),
                key_id: creds.private_key_id.clone().none_if_empty(),
                scopes: scopes_for(version),
                token_url: format!("{}/oauth2/v1/token", base_url.trim_end_matches('/')),
            });
        }

        if creds.domain.is_empty() {
            return Err(Error::auth(format!(
                "no usable credentials: domain is not set (set `domain` in the connection config or {ENV_ORG_URL})"
            )));
        }
        Err(Error::auth(format!(
            "no usable credential combination for {}: provide `token`, or `client_id` with `private_key`",
            creds.domain
        )))
    }
}

/// Cached access token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

//! Session registry and versioned vendor clients
//!
//! One authenticated client per (execution context, API version), built
//! lazily on first use and shared by every table that asks for the same
//! version. Construction is single-flighted per version so concurrent
//! hydrations never race two clients into existence; the registry holds no
//! lock across the network-facing parts of construction.

use crate::auth::{AuthMode, Authenticator};
use crate::config::{ConnectionConfig, Credentials};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::page::{Page, PageCursor};
use crate::types::{ApiVersion, JsonValue};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

// ============================================================================
// OktaClient: the session handle
// ============================================================================

/// An authenticated client bound to one vendor API version.
///
/// The capability surface is deliberately minimal: `get_json`, `list`, and
/// `next_page`. New vendor versions become new `ApiVersion` slots over this
/// same surface, never new call-site branches.
pub struct OktaClient {
    version: ApiVersion,
    base_url: String,
    http: HttpClient,
}

impl OktaClient {
    /// The version this handle is bound to
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// The normalized org URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single resource by path
    pub async fn get_json(&self, path: &str) -> Result<JsonValue> {
        let response = self.http.get(path).await?;
        response.json().await.map_err(Error::Http)
    }

    /// Issue a list call and return the first page plus its continuation
    pub async fn list(&self, path: &str, params: &[(String, String)]) -> Result<Page> {
        let mut config = RequestConfig::new();
        for (key, value) in params {
            config = config.query(key.as_str(), value.as_str());
        }
        let response = self.http.get_with_config(path, config).await?;
        Self::page_from(response).await
    }

    /// Fetch the page behind a continuation cursor
    pub async fn next_page(&self, cursor: &PageCursor) -> Result<Page> {
        let url = cursor
            .next_url()
            .ok_or_else(|| Error::decode("next_page called without a continuation"))?;
        let response = self.http.get(url).await?;
        Self::page_from(response).await
    }

    async fn page_from(response: reqwest::Response) -> Result<Page> {
        let cursor = PageCursor::from_headers(response.headers());
        let body: JsonValue = response.json().await.map_err(Error::Http)?;
        let items = match body {
            JsonValue::Array(items) => items,
            other => {
                return Err(Error::decode(format!(
                    "expected a JSON array from a list endpoint, got {}",
                    json_kind(&other)
                )))
            }
        };
        debug!(items = items.len(), has_next = cursor.has_next(), "fetched page");
        Ok(Page { items, cursor })
    }
}

impl std::fmt::Debug for OktaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OktaClient")
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

// ============================================================================
// SessionRegistry
// ============================================================================

/// Version-keyed cache of session handles, owned by the execution context.
///
/// Created at context start, discarded at context end; handles are never
/// mutated after construction.
pub struct SessionRegistry {
    credentials: Credentials,
    sessions: HashMap<ApiVersion, OnceCell<Arc<OktaClient>>>,
}

impl SessionRegistry {
    /// Build a registry over already-resolved credentials
    pub fn new(credentials: Credentials) -> Self {
        let sessions = ApiVersion::ALL
            .iter()
            .map(|v| (*v, OnceCell::new()))
            .collect();
        Self {
            credentials,
            sessions,
        }
    }

    /// Resolve a connection config and build a registry over it
    pub fn from_config(config: &ConnectionConfig) -> Result<Self> {
        Ok(Self::new(config.resolve()?))
    }

    /// The resolved credentials backing this registry
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get or construct the client for a version.
    ///
    /// At most one construction runs per version; concurrent callers wait on
    /// the same in-flight construction and share the resulting handle.
    pub async fn get_client(&self, version: ApiVersion) -> Result<Arc<OktaClient>> {
        let cell = self
            .sessions
            .get(&version)
            .expect("every ApiVersion has a session slot");
        let client = cell
            .get_or_try_init(|| self.construct(version))
            .await?;
        Ok(Arc::clone(client))
    }

    async fn construct(&self, version: ApiVersion) -> Result<Arc<OktaClient>> {
        let base_url = normalize_org_url(&self.credentials.domain)?;
        let mode = AuthMode::select(&self.credentials, version, &base_url)?;

        let config = HttpClientConfig::from_credentials(base_url.as_str(), &self.credentials);
        let http = HttpClient::with_auth(config, Authenticator::new(mode));

        info!(%version, %base_url, "constructed okta client");
        Ok(Arc::new(OktaClient {
            version,
            base_url,
            http,
        }))
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("domain", &self.credentials.domain)
            .finish_non_exhaustive()
    }
}

/// Normalize an org URL: add the https scheme when missing, validate the
/// host, and strip any trailing slash. Empty input passes through so auth
/// selection can report the missing domain instead.
fn normalize_org_url(domain: &str) -> Result<String> {
    if domain.is_empty() {
        return Ok(String::new());
    }
    let with_scheme = if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };
    let parsed = url::Url::parse(&with_scheme)?;
    if parsed.host_str().is_none() {
        return Err(Error::config(format!("org URL has no host: {domain}")));
    }
    Ok(with_scheme.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests;

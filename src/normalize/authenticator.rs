//! Authenticator response family
//!
//! List-authenticators items are discriminated by `type`. The `settings`
//! bag varies per variant and stays opaque.

use crate::types::{JsonValue, TableRow};
use serde::Deserialize;
use serde_json::json;

/// Envelope fields shared by every authenticator variant
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatorEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default, rename = "lastUpdated")]
    pub last_updated: Option<String>,
    /// Variant-specific configuration, kept opaque
    #[serde(default)]
    pub settings: Option<JsonValue>,
    #[serde(default)]
    pub provider: Option<JsonValue>,
}

/// Tagged union of concrete authenticator shapes
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum AuthenticatorItem {
    #[serde(rename = "app")]
    App(AuthenticatorEnvelope),
    #[serde(rename = "email")]
    Email(AuthenticatorEnvelope),
    #[serde(rename = "phone")]
    Phone(AuthenticatorEnvelope),
    #[serde(rename = "password")]
    Password(AuthenticatorEnvelope),
    #[serde(rename = "security_question")]
    SecurityQuestion(AuthenticatorEnvelope),
    #[serde(rename = "security_key")]
    SecurityKey(AuthenticatorEnvelope),
}

impl AuthenticatorItem {
    /// The discriminant value this variant was matched on
    pub fn authenticator_type(&self) -> &'static str {
        match self {
            AuthenticatorItem::App(_) => "app",
            AuthenticatorItem::Email(_) => "email",
            AuthenticatorItem::Phone(_) => "phone",
            AuthenticatorItem::Password(_) => "password",
            AuthenticatorItem::SecurityQuestion(_) => "security_question",
            AuthenticatorItem::SecurityKey(_) => "security_key",
        }
    }

    fn envelope(&self) -> &AuthenticatorEnvelope {
        match self {
            AuthenticatorItem::App(e)
            | AuthenticatorItem::Email(e)
            | AuthenticatorItem::Phone(e)
            | AuthenticatorItem::Password(e)
            | AuthenticatorItem::SecurityQuestion(e)
            | AuthenticatorItem::SecurityKey(e) => e,
        }
    }
}

/// Reduce a raw list-authenticators item to a flat record.
///
/// Returns `None` when no known variant matches.
pub fn normalize_authenticator(item: &JsonValue) -> Option<TableRow> {
    let authenticator: AuthenticatorItem = serde_json::from_value(item.clone()).ok()?;
    let env = authenticator.envelope();

    let mut row = TableRow::new();
    row.insert("id".to_string(), json!(env.id));
    row.insert("key".to_string(), json!(env.key));
    row.insert("name".to_string(), json!(env.name));
    row.insert(
        "authenticator_type".to_string(),
        json!(authenticator.authenticator_type()),
    );
    row.insert("status".to_string(), json!(env.status));
    row.insert("created".to_string(), json!(env.created));
    row.insert("last_updated".to_string(), json!(env.last_updated));
    row.insert(
        "settings".to_string(),
        env.settings.clone().unwrap_or(JsonValue::Null),
    );
    row.insert(
        "provider".to_string(),
        env.provider.clone().unwrap_or(JsonValue::Null),
    );
    Some(row)
}

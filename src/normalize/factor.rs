//! Factor response family
//!
//! List-factors items are discriminated by `factorType`. Every variant
//! shares the same envelope; the `profile` bag differs per variant and is
//! passed through opaquely.

use crate::types::{JsonValue, TableRow};
use serde::Deserialize;
use serde_json::json;

/// Envelope fields shared by every factor variant
#[derive(Debug, Clone, Deserialize)]
pub struct FactorEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default, rename = "lastUpdated")]
    pub last_updated: Option<String>,
    /// Variant-specific attributes, kept opaque
    #[serde(default)]
    pub profile: Option<JsonValue>,
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<JsonValue>,
    #[serde(default)]
    pub verify: Option<JsonValue>,
}

/// Tagged union of concrete factor shapes.
///
/// The variant list is the discriminant mapping table; its order matches the
/// vendor's documented factor catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "factorType")]
pub enum Factor {
    #[serde(rename = "call")]
    Call(FactorEnvelope),
    #[serde(rename = "email")]
    Email(FactorEnvelope),
    #[serde(rename = "push")]
    Push(FactorEnvelope),
    #[serde(rename = "sms")]
    Sms(FactorEnvelope),
    #[serde(rename = "question")]
    SecurityQuestion(FactorEnvelope),
    #[serde(rename = "token")]
    Token(FactorEnvelope),
    #[serde(rename = "token:software:totp")]
    Totp(FactorEnvelope),
    #[serde(rename = "token:hotp")]
    Hotp(FactorEnvelope),
    #[serde(rename = "token:hardware")]
    Hardware(FactorEnvelope),
    #[serde(rename = "u2f")]
    U2f(FactorEnvelope),
    #[serde(rename = "webauthn")]
    WebAuthn(FactorEnvelope),
}

impl Factor {
    /// The discriminant value this variant was matched on
    pub fn factor_type(&self) -> &'static str {
        match self {
            Factor::Call(_) => "call",
            Factor::Email(_) => "email",
            Factor::Push(_) => "push",
            Factor::Sms(_) => "sms",
            Factor::SecurityQuestion(_) => "question",
            Factor::Token(_) => "token",
            Factor::Totp(_) => "token:software:totp",
            Factor::Hotp(_) => "token:hotp",
            Factor::Hardware(_) => "token:hardware",
            Factor::U2f(_) => "u2f",
            Factor::WebAuthn(_) => "webauthn",
        }
    }

    /// The shared envelope of whichever variant matched
    pub fn envelope(&self) -> &FactorEnvelope {
        match self {
            Factor::Call(e)
            | Factor::Email(e)
            | Factor::Push(e)
            | Factor::Sms(e)
            | Factor::SecurityQuestion(e)
            | Factor::Token(e)
            | Factor::Totp(e)
            | Factor::Hotp(e)
            | Factor::Hardware(e)
            | Factor::U2f(e)
            | Factor::WebAuthn(e) => e,
        }
    }
}

/// Reduce a raw list-factors item to a flat record.
///
/// Returns `None` when no known variant matches.
pub fn normalize_factor(item: &JsonValue) -> Option<TableRow> {
    let factor: Factor = serde_json::from_value(item.clone()).ok()?;
    let env = factor.envelope();

    let mut row = TableRow::new();
    row.insert("id".to_string(), json!(env.id));
    row.insert("factor_type".to_string(), json!(factor.factor_type()));
    row.insert("provider".to_string(), json!(env.provider));
    row.insert("status".to_string(), json!(env.status));
    row.insert("created".to_string(), json!(env.created));
    row.insert("last_updated".to_string(), json!(env.last_updated));
    row.insert("profile".to_string(), env.profile.clone().unwrap_or(JsonValue::Null));
    row.insert(
        "embedded".to_string(),
        env.embedded.clone().unwrap_or(JsonValue::Null),
    );
    row.insert("verify".to_string(), env.verify.clone().unwrap_or(JsonValue::Null));
    Some(row)
}

//! Network zone response family
//!
//! Zones are discriminated by `type`: address-based zones carry gateway and
//! proxy ranges, dynamic zones carry geolocations, ASNs, and a proxy type.

use crate::types::{JsonValue, TableRow};
use serde::Deserialize;
use serde_json::json;

/// Envelope fields shared by every zone variant
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub system: Option<bool>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default, rename = "lastUpdated")]
    pub last_updated: Option<String>,
}

/// Address-based zone payload
#[derive(Debug, Clone, Deserialize)]
pub struct IpZone {
    #[serde(flatten)]
    pub envelope: ZoneEnvelope,
    #[serde(default)]
    pub gateways: Option<JsonValue>,
    #[serde(default)]
    pub proxies: Option<JsonValue>,
}

/// Location-based zone payload
#[derive(Debug, Clone, Deserialize)]
pub struct DynamicZone {
    #[serde(flatten)]
    pub envelope: ZoneEnvelope,
    #[serde(default)]
    pub locations: Option<JsonValue>,
    #[serde(default)]
    pub asns: Option<JsonValue>,
    #[serde(default, rename = "proxyType")]
    pub proxy_type: Option<String>,
}

/// Tagged union of concrete zone shapes
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum NetworkZone {
    #[serde(rename = "IP")]
    Ip(IpZone),
    #[serde(rename = "DYNAMIC")]
    Dynamic(DynamicZone),
    #[serde(rename = "DYNAMIC_V2")]
    DynamicV2(DynamicZone),
}

impl NetworkZone {
    /// The discriminant value this variant was matched on
    pub fn zone_type(&self) -> &'static str {
        match self {
            NetworkZone::Ip(_) => "IP",
            NetworkZone::Dynamic(_) => "DYNAMIC",
            NetworkZone::DynamicV2(_) => "DYNAMIC_V2",
        }
    }

    fn envelope(&self) -> &ZoneEnvelope {
        match self {
            NetworkZone::Ip(z) => &z.envelope,
            NetworkZone::Dynamic(z) | NetworkZone::DynamicV2(z) => &z.envelope,
        }
    }
}

/// Reduce a raw list-zones item to a flat record.
///
/// Returns `None` when no known variant matches. Variant-specific columns
/// are null for the variants that lack them.
pub fn normalize_zone(item: &JsonValue) -> Option<TableRow> {
    let zone: NetworkZone = serde_json::from_value(item.clone()).ok()?;
    let env = zone.envelope();

    let mut row = TableRow::new();
    row.insert("id".to_string(), json!(env.id));
    row.insert("name".to_string(), json!(env.name));
    row.insert("zone_type".to_string(), json!(zone.zone_type()));
    row.insert("status".to_string(), json!(env.status));
    row.insert("system".to_string(), json!(env.system));
    row.insert("usage".to_string(), json!(env.usage));
    row.insert("created".to_string(), json!(env.created));
    row.insert("last_updated".to_string(), json!(env.last_updated));

    match &zone {
        NetworkZone::Ip(z) => {
            row.insert(
                "gateways".to_string(),
                z.gateways.clone().unwrap_or(JsonValue::Null),
            );
            row.insert(
                "proxies".to_string(),
                z.proxies.clone().unwrap_or(JsonValue::Null),
            );
            row.insert("locations".to_string(), JsonValue::Null);
            row.insert("asns".to_string(), JsonValue::Null);
            row.insert("proxy_type".to_string(), JsonValue::Null);
        }
        NetworkZone::Dynamic(z) | NetworkZone::DynamicV2(z) => {
            row.insert("gateways".to_string(), JsonValue::Null);
            row.insert("proxies".to_string(), JsonValue::Null);
            row.insert(
                "locations".to_string(),
                z.locations.clone().unwrap_or(JsonValue::Null),
            );
            row.insert("asns".to_string(), z.asns.clone().unwrap_or(JsonValue::Null));
            row.insert("proxy_type".to_string(), json!(z.proxy_type));
        }
    }
    Some(row)
}

//! Tests for polymorphic response normalization

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Factor Tests
// ============================================================================

#[test]
fn test_factor_known_variant_normalizes() {
    let item = json!({
        "id": "uft1",
        "factorType": "sms",
        "provider": "OKTA",
        "status": "ACTIVE",
        "created": "2024-01-01T00:00:00.000Z",
        "lastUpdated": "2024-02-01T00:00:00.000Z",
        "profile": {"phoneNumber": "+15551234567"}
    });

    let row = normalize_factor(&item).unwrap();
    assert_eq!(row["id"], json!("uft1"));
    assert_eq!(row["factor_type"], json!("sms"));
    assert_eq!(row["provider"], json!("OKTA"));
    assert_eq!(row["status"], json!("ACTIVE"));
    assert_eq!(row["profile"], json!({"phoneNumber": "+15551234567"}));
}

#[test]
fn test_factor_compound_discriminants() {
    let totp = json!({"id": "uft2", "factorType": "token:software:totp"});
    assert_eq!(
        normalize_factor(&totp).unwrap()["factor_type"],
        json!("token:software:totp")
    );

    let hotp = json!({"id": "uft3", "factorType": "token:hotp"});
    assert_eq!(
        normalize_factor(&hotp).unwrap()["factor_type"],
        json!("token:hotp")
    );
}

#[test]
fn test_factor_unknown_discriminant_is_empty() {
    let item = json!({"id": "uft4", "factorType": "carrier-pigeon"});
    assert!(normalize_factor(&item).is_none());
}

#[test]
fn test_factor_missing_discriminant_is_empty() {
    let item = json!({"id": "uft5", "status": "ACTIVE"});
    assert!(normalize_factor(&item).is_none());
}

#[test]
fn test_factor_profile_bag_stays_opaque() {
    let item = json!({
        "factorType": "webauthn",
        "profile": {
            "credentialId": "abc",
            "authenticatorName": "MacBook Touch ID",
            "nested": {"deeply": [1, 2, 3]}
        }
    });
    let row = normalize_factor(&item).unwrap();
    // The bag is passed through whole, not field-by-field
    assert_eq!(row["profile"]["nested"]["deeply"], json!([1, 2, 3]));
}

#[test]
fn test_factor_absent_envelope_fields_are_null() {
    let row = normalize_factor(&json!({"factorType": "email"})).unwrap();
    assert_eq!(row["id"], json!(null));
    assert_eq!(row["verify"], json!(null));
    assert_eq!(row["embedded"], json!(null));
}

// ============================================================================
// Authenticator Tests
// ============================================================================

#[test]
fn test_authenticator_known_variant_normalizes() {
    let item = json!({
        "type": "security_key",
        "id": "aut1",
        "key": "webauthn",
        "name": "Security Key or Biometric",
        "status": "ACTIVE",
        "created": "2024-01-01T00:00:00.000Z",
        "lastUpdated": "2024-03-01T00:00:00.000Z",
        "settings": {"userVerification": "PREFERRED"}
    });

    let row = normalize_authenticator(&item).unwrap();
    assert_eq!(row["id"], json!("aut1"));
    assert_eq!(row["authenticator_type"], json!("security_key"));
    assert_eq!(row["key"], json!("webauthn"));
    assert_eq!(row["settings"], json!({"userVerification": "PREFERRED"}));
}

#[test]
fn test_authenticator_every_documented_variant_matches() {
    for tag in [
        "app",
        "email",
        "phone",
        "password",
        "security_question",
        "security_key",
    ] {
        let item = json!({"type": tag, "id": "aut2"});
        let row = normalize_authenticator(&item)
            .unwrap_or_else(|| panic!("variant {tag} should normalize"));
        assert_eq!(row["authenticator_type"], json!(tag));
    }
}

#[test]
fn test_authenticator_unknown_discriminant_is_empty() {
    assert!(normalize_authenticator(&json!({"type": "telepathy", "id": "aut3"})).is_none());
}

// ============================================================================
// Network Zone Tests
// ============================================================================

#[test]
fn test_ip_zone_carries_address_fields() {
    let item = json!({
        "type": "IP",
        "id": "nzo1",
        "name": "LegacyIpZone",
        "status": "ACTIVE",
        "system": true,
        "usage": "POLICY",
        "gateways": [{"type": "CIDR", "value": "10.0.0.0/8"}],
        "proxies": [{"type": "RANGE", "value": "1.2.3.4-1.2.3.8"}]
    });

    let row = normalize_zone(&item).unwrap();
    assert_eq!(row["zone_type"], json!("IP"));
    assert_eq!(row["system"], json!(true));
    assert_eq!(row["gateways"][0]["value"], json!("10.0.0.0/8"));
    assert_eq!(row["locations"], json!(null));
    assert_eq!(row["proxy_type"], json!(null));
}

#[test]
fn test_dynamic_zone_carries_location_fields() {
    let item = json!({
        "type": "DYNAMIC",
        "id": "nzo2",
        "name": "BlockedCountries",
        "usage": "BLOCKLIST",
        "locations": [{"country": "XX"}],
        "asns": ["23456"],
        "proxyType": "Tor"
    });

    let row = normalize_zone(&item).unwrap();
    assert_eq!(row["zone_type"], json!("DYNAMIC"));
    assert_eq!(row["usage"], json!("BLOCKLIST"));
    assert_eq!(row["locations"], json!([{"country": "XX"}]));
    assert_eq!(row["asns"], json!(["23456"]));
    assert_eq!(row["proxy_type"], json!("Tor"));
    assert_eq!(row["gateways"], json!(null));
}

#[test]
fn test_dynamic_v2_zone_matches() {
    let item = json!({
        "type": "DYNAMIC_V2",
        "id": "nzo3",
        "name": "EnhancedDynamicZone",
        "locations": {"include": [], "exclude": [{"country": "YY"}]}
    });
    let row = normalize_zone(&item).unwrap();
    assert_eq!(row["zone_type"], json!("DYNAMIC_V2"));
    assert_eq!(row["locations"]["exclude"][0]["country"], json!("YY"));
}

#[test]
fn test_zone_unknown_discriminant_is_empty() {
    assert!(normalize_zone(&json!({"type": "QUANTUM", "id": "nzo4"})).is_none());
}

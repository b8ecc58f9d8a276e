//! Tests for the session registry and versioned clients

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_credentials(domain: &str) -> Credentials {
    ConnectionConfig {
        domain: Some(domain.to_string()),
        token: Some("abc".to_string()),
        ..Default::default()
    }
    .resolve_from(|_| None)
    .unwrap()
}

// ============================================================================
// URL Normalization Tests
// ============================================================================

#[test]
fn test_normalize_org_url_adds_https() {
    assert_eq!(
        normalize_org_url("example.okta.com").unwrap(),
        "https://example.okta.com"
    );
}

#[test]
fn test_normalize_org_url_keeps_scheme_and_strips_slash() {
    assert_eq!(
        normalize_org_url("https://example.okta.com/").unwrap(),
        "https://example.okta.com"
    );
    assert_eq!(
        normalize_org_url("http://127.0.0.1:8080").unwrap(),
        "http://127.0.0.1:8080"
    );
}

#[test]
fn test_normalize_org_url_rejects_garbage() {
    assert!(normalize_org_url("ht tp://bad url").is_err());
}

#[test]
fn test_normalize_org_url_passes_empty_through() {
    assert_eq!(normalize_org_url("").unwrap(), "");
}

// ============================================================================
// Registry Tests
// ============================================================================

#[tokio::test]
async fn test_same_version_shares_one_client() {
    let registry = SessionRegistry::new(token_credentials("https://example.okta.com"));

    let a = registry.get_client(ApiVersion::V1).await.unwrap();
    let b = registry.get_client(ApiVersion::V1).await.unwrap();
    assert!(Arc::ptr_eq(&a, &b), "same version must share one handle");
}

#[tokio::test]
async fn test_versions_never_collide() {
    let registry = SessionRegistry::new(token_credentials("https://example.okta.com"));

    let v1 = registry.get_client(ApiVersion::V1).await.unwrap();
    let v5 = registry.get_client(ApiVersion::V5).await.unwrap();
    assert!(!Arc::ptr_eq(&v1, &v5));
    assert_eq!(v1.version(), ApiVersion::V1);
    assert_eq!(v5.version(), ApiVersion::V5);
}

#[tokio::test]
async fn test_concurrent_requests_construct_once() {
    let registry = Arc::new(SessionRegistry::new(token_credentials(
        "https://example.okta.com",
    )));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            registry.get_client(ApiVersion::V4).await.unwrap()
        }));
    }

    let clients: Vec<_> = futures_join_all(handles).await;
    for pair in clients.windows(2) {
        assert!(Arc::ptr_eq(&pair[0], &pair[1]));
    }
}

async fn futures_join_all(
    handles: Vec<tokio::task::JoinHandle<Arc<OktaClient>>>,
) -> Vec<Arc<OktaClient>> {
    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        out.push(handle.await.unwrap());
    }
    out
}

#[tokio::test]
async fn test_missing_domain_is_an_auth_error() {
    let registry = SessionRegistry::new(
        ConnectionConfig::default().resolve_from(|_| None).unwrap(),
    );
    let err = registry.get_client(ApiVersion::V1).await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("Authentication failed"), "got: {text}");
    assert!(text.contains("domain"), "got: {text}");
}

#[tokio::test]
async fn test_malformed_domain_fails_construction() {
    let registry = SessionRegistry::new(token_credentials("ht tp://bad url"));
    assert!(registry.get_client(ApiVersion::V1).await.is_err());
}

#[tokio::test]
async fn test_domain_without_scheme_is_normalized() {
    let registry = SessionRegistry::new(token_credentials("example.okta.com"));
    let client = registry.get_client(ApiVersion::V1).await.unwrap();
    assert_eq!(client.base_url(), "https://example.okta.com");
}

// ============================================================================
// Client Capability Tests
// ============================================================================

#[tokio::test]
async fn test_get_json_carries_ssws_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/00u1"))
        .and(header("Authorization", "SSWS abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "00u1",
            "status": "ACTIVE"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = SessionRegistry::new(token_credentials(&server.uri()));
    let client = registry.get_client(ApiVersion::V1).await.unwrap();

    let user = client.get_json("/api/v1/users/00u1").await.unwrap();
    assert_eq!(user["id"], json!("00u1"));
}

#[tokio::test]
async fn test_list_parses_items_and_continuation() {
    let server = MockServer::start().await;
    let next = format!("{}/api/v1/users?after=2", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "00u1"}, {"id": "00u2"}]))
                .insert_header("link", format!("<{next}>; rel=\"next\"").as_str()),
        )
        .mount(&server)
        .await;

    let registry = SessionRegistry::new(token_credentials(&server.uri()));
    let client = registry.get_client(ApiVersion::V1).await.unwrap();

    let page = client.list("/api/v1/users", &[]).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.cursor.has_next());
    assert_eq!(page.cursor.next_url(), Some(next.as_str()));
}

#[tokio::test]
async fn test_list_rejects_non_array_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let registry = SessionRegistry::new(token_credentials(&server.uri()));
    let client = registry.get_client(ApiVersion::V1).await.unwrap();

    let err = client.list("/api/v1/users", &[]).await.unwrap_err();
    assert!(err.to_string().contains("array"), "got: {err}");
}

#[tokio::test]
async fn test_get_json_not_found_classification() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            "{\"errorCode\":\"E0000007\",\"errorSummary\":\"Not found: Resource not found\"}",
        ))
        .mount(&server)
        .await;

    let registry = SessionRegistry::new(token_credentials(&server.uri()));
    let client = registry.get_client(ApiVersion::V1).await.unwrap();

    let err = client.get_json("/api/v1/users/missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_next_page_without_continuation_is_an_error() {
    let registry = SessionRegistry::new(token_credentials("https://example.okta.com"));
    let client = registry.get_client(ApiVersion::V1).await.unwrap();
    assert!(client.next_page(&PageCursor::none()).await.is_err());
}

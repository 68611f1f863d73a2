//! RDAP adapter against a local mock registry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ip_tracker::whois::{AsnOrigin, AsnOriginSource, RdapClient, RdapRegistry};
use ip_tracker::{validate, IpAddress, LookupError, LookupErrorKind, RegistrySource};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOOGLE_NETWORK: &str = r#"{
    "rdapConformance": ["rdap_level_0", "nro_rdap_profile_0"],
    "objectClassName": "ip network",
    "handle": "NET-8-8-8-0-2",
    "startAddress": "8.8.8.0",
    "endAddress": "8.8.8.255",
    "ipVersion": "v4",
    "name": "GOGL",
    "type": "DIRECT ALLOCATION",
    "parentHandle": "NET-8-0-0-0-0",
    "entities": []
}"#;

struct FixedOrigin(Result<AsnOrigin, LookupError>);

#[async_trait]
impl AsnOriginSource for FixedOrigin {
    async fn origin(&self, _ip: &IpAddress) -> Result<AsnOrigin, LookupError> {
        self.0.clone()
    }
}

fn google_origin() -> AsnOrigin {
    AsnOrigin {
        asn: "15169".to_string(),
        cidr: "8.8.8.0/24".to_string(),
        country_code: Some("US".to_string()),
        registry: "arin".to_string(),
        allocated: chrono::NaiveDate::from_ymd_opt(2023, 12, 28),
        description: Some("GOOGLE - Google LLC, US".to_string()),
    }
}

fn rdap_client(server: &MockServer) -> RdapClient {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build client");
    RdapClient::new(Arc::new(client), &server.uri()).expect("mock server URI is a valid URL")
}

async fn mount(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/ip/8.8.8.8"))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "application/rdap+json")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_network_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip/8.8.8.8"))
        .and(header_regex("accept", r"application/rdap\+json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GOOGLE_NETWORK))
        .expect(1)
        .mount(&server)
        .await;

    let network = rdap_client(&server)
        .fetch_network(&validate("8.8.8.8").unwrap())
        .await
        .unwrap();

    assert_eq!(network.name.as_deref(), Some("GOGL"));
    assert_eq!(network.ip_version, Some(4));
    assert_eq!(network.range().as_deref(), Some("8.8.8.0 - 8.8.8.255"));
}

#[tokio::test]
async fn test_registry_merges_origin_and_network() {
    let server = MockServer::start().await;
    mount(&server, 200, GOOGLE_NETWORK).await;

    let registry = RdapRegistry::new(
        Arc::new(FixedOrigin(Ok(google_origin()))),
        rdap_client(&server),
    );
    let record = registry
        .resolve(&validate("8.8.8.8").unwrap())
        .await
        .unwrap();

    assert_eq!(record.asn, "15169");
    assert_eq!(record.asn_description.as_deref(), Some("GOOGLE - Google LLC, US"));
    assert_eq!(record.asn_registry, "arin");
    assert_eq!(record.asn_cidr, "8.8.8.0/24");
    assert_eq!(record.asn_date.map(|d| d.to_string()).as_deref(), Some("2023-12-28"));
    assert_eq!(record.ip_version, Some(4));
    assert_eq!(record.network_type.as_deref(), Some("DIRECT ALLOCATION"));
}

#[tokio::test]
async fn test_http_404_is_not_found() {
    let server = MockServer::start().await;
    mount(
        &server,
        404,
        r#"{"errorCode":404,"title":"Not Found","description":["No network for 8.8.8.8"]}"#,
    )
    .await;

    let err = rdap_client(&server)
        .fetch_network(&validate("8.8.8.8").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, LookupErrorKind::NotFound);
}

#[tokio::test]
async fn test_server_error_is_network_unavailable() {
    let server = MockServer::start().await;
    mount(&server, 503, "Service Unavailable").await;

    let err = rdap_client(&server)
        .fetch_network(&validate("8.8.8.8").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, LookupErrorKind::NetworkUnavailable);
}

#[tokio::test]
async fn test_malformed_body_is_malformed_response() {
    let server = MockServer::start().await;
    mount(&server, 200, "<html><body>rate limited</body></html>").await;

    let err = rdap_client(&server)
        .fetch_network(&validate("8.8.8.8").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, LookupErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_wrong_object_class_is_malformed_response() {
    let server = MockServer::start().await;
    mount(
        &server,
        200,
        r#"{"objectClassName":"autnum","handle":"AS15169","startAutnum":15169}"#,
    )
    .await;

    let err = rdap_client(&server)
        .fetch_network(&validate("8.8.8.8").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, LookupErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_origin_failure_fails_whole_record() {
    let server = MockServer::start().await;
    mount(&server, 200, GOOGLE_NETWORK).await;

    let registry = RdapRegistry::new(
        Arc::new(FixedOrigin(Err(LookupError::network_unavailable(
            "ASN origin: request timed out",
        )))),
        rdap_client(&server),
    );
    let err = registry
        .resolve(&validate("8.8.8.8").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, LookupErrorKind::NetworkUnavailable);
}

#[tokio::test]
async fn test_unreachable_registry_is_network_unavailable() {
    // Nothing listens on port 1
    let client = RdapClient::new(Arc::new(reqwest::Client::new()), "http://127.0.0.1:1").unwrap();

    let err = client
        .fetch_network(&validate("8.8.8.8").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, LookupErrorKind::NetworkUnavailable);
}

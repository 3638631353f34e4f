//! End-to-end discovery and resolution tests.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lumenfed::{FederationError, FederationServer, FetchOptions, TransportError, resolve};

const ACCOUNT_ID: &str = "GB5XVAABEQMY63WTHDQ5RXADGYF345VWMNPTN2GFUDZT57D57ZQTJ7PS";
const WELL_KNOWN: &str = "/.well-known/stellar.toml";

fn domain_of(mock: &MockServer) -> String {
    mock.address().to_string()
}

#[tokio::test]
async fn for_domain_binds_to_the_discovered_endpoint() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WELL_KNOWN))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "FEDERATION_SERVER=\"https://api.example.org/federation\"\n",
        ))
        .expect(1)
        .mount(&mock)
        .await;

    let domain = domain_of(&mock);
    let server = FederationServer::for_domain(&domain, &FetchOptions::allowing_http())
        .await
        .expect("discovery succeeds");

    assert_eq!(server.server_url().scheme(), "https");
    assert_eq!(server.server_url().host_str(), Some("api.example.org"));
    assert_eq!(server.server_url().path(), "/federation");
    assert_eq!(server.domain(), domain);
}

#[tokio::test]
async fn for_domain_fails_when_the_field_is_missing() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WELL_KNOWN))
        .respond_with(ResponseTemplate::new(200).set_body_string("SIGNING_KEY=\"unused\"\n"))
        .mount(&mock)
        .await;

    let err = FederationServer::for_domain(&domain_of(&mock), &FetchOptions::allowing_http())
        .await
        .expect_err("document without FEDERATION_SERVER must fail");
    assert!(matches!(
        err,
        FederationError::MissingFederationServer { .. }
    ));
}

#[tokio::test]
async fn resolve_follows_discovery_to_the_record() {
    let mock = MockServer::start().await;
    let address = format!("bob*{}", domain_of(&mock));

    Mock::given(method("GET"))
        .and(path(WELL_KNOWN))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "FEDERATION_SERVER=\"{}/federation\"\n",
            mock.uri()
        )))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/federation"))
        .and(query_param("type", "name"))
        .and(query_param("q", &address))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stellar_address": address,
            "account_id": ACCOUNT_ID,
            "memo_type": "id",
            "memo": "100",
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let record = resolve(&address, &FetchOptions::allowing_http())
        .await
        .expect("address resolves end to end");
    assert_eq!(record.account_id, ACCOUNT_ID);
    assert_eq!(record.stellar_address.as_deref(), Some(address.as_str()));
    assert_eq!(record.memo_type.as_deref(), Some("id"));
    assert_eq!(record.memo.as_deref(), Some("100"));
    assert!(record.extra.is_empty());
}

#[tokio::test]
async fn resolve_times_out_when_discovery_lags() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WELL_KNOWN))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("FEDERATION_SERVER=\"https://api.example.org/federation\"")
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock)
        .await;

    let address = format!("bob*{}", domain_of(&mock));
    let options = FetchOptions::allowing_http().with_timeout(Duration::from_millis(1000));
    let err = resolve(&address, &options)
        .await
        .expect_err("lagging discovery must time out");
    match err {
        FederationError::Transport(TransportError::Timeout { timeout }) => {
            assert_eq!(timeout, Duration::from_millis(1000));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn discovery_failures_propagate_unchanged() {
    // No federation endpoint is queried when discovery itself fails: the
    // only mounted mock is the well-known document, and it answers 404.
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WELL_KNOWN))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock)
        .await;

    let address = format!("bob*{}", domain_of(&mock));
    let err = resolve(&address, &FetchOptions::allowing_http())
        .await
        .expect_err("failed discovery must fail the resolution");
    assert!(matches!(
        err,
        FederationError::Transport(TransportError::Network(_))
    ));
}

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::api_for;
use crate::clients::{ApiClient, MetadataExtractionClient};
use crate::config::SerpConfig;
use crate::error::ErrorKind;

const IDENTITY: &str = "user_1700000000000_42";

#[tokio::test]
async fn test_extract_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-meta"))
        .and(body_partial_json(json!({
            "url": "https://example.com",
            "user_id": IDENTITY,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Example Title",
            "meta_description": "Example Desc",
            "metadata": {"og_title": "Example Title", "platform": "Unknown"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MetadataExtractionClient::new(api_for(&server));
    let result = client.extract("https://example.com", IDENTITY).await.unwrap();

    assert_eq!(result.title, "Example Title");
    assert_eq!(result.meta_description, "Example Desc");
    assert_eq!(
        result.metadata.get("platform"),
        Some(&json!("Unknown"))
    );
}

#[tokio::test]
async fn test_extract_handles_missing_metadata_map() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-meta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "T",
            "meta_description": "D",
        })))
        .mount(&server)
        .await;

    let client = MetadataExtractionClient::new(api_for(&server));
    let result = client.extract("https://example.com", IDENTITY).await.unwrap();
    assert!(result.metadata.is_empty());
}

#[tokio::test]
async fn test_extract_rate_limit_message_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-meta"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"message": "X"})))
        .mount(&server)
        .await;

    let client = MetadataExtractionClient::new(api_for(&server));
    let error = client
        .extract("https://example.com", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RateLimit);
    assert_eq!(error.to_string(), "X");
}

#[tokio::test]
async fn test_extract_rate_limit_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-meta"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = MetadataExtractionClient::new(api_for(&server));
    let error = client
        .extract("https://example.com", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RateLimit);
    assert_eq!(
        error.to_string(),
        "You have reached the daily extraction limit"
    );
}

#[tokio::test]
async fn test_extract_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-meta"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "upstream broke"})),
        )
        .mount(&server)
        .await;

    let client = MetadataExtractionClient::new(api_for(&server));
    let error = client
        .extract("https://example.com", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Server);
    assert_eq!(error.to_string(), "upstream broke");
}

#[tokio::test]
async fn test_extract_invalid_url_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-meta"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = MetadataExtractionClient::new(api_for(&server));
    let error = client.extract("not a url", IDENTITY).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_extract_transport_failure_is_network() {
    // Nothing listens on port 1
    let api = ApiClient::new(&SerpConfig::new("http://127.0.0.1:1")).unwrap();
    let client = MetadataExtractionClient::new(api);

    let error = client
        .extract("https://example.com", IDENTITY)
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_extract_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-meta"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = MetadataExtractionClient::new(api_for(&server));
    let error = client
        .extract("https://example.com", IDENTITY)
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Server);
}

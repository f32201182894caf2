use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::api_for;
use crate::clients::AnalysisClient;
use crate::entry::SerpEntry;
use crate::error::ErrorKind;

const IDENTITY: &str = "user_1700000000000_42";

fn entry() -> SerpEntry {
    SerpEntry::new("A good title", "A good description", "https://example.com")
}

#[tokio::test]
async fn test_analyze_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_partial_json(json!({
            "title": "A good title",
            "description": "A good description",
            "url": "https://example.com",
            "keyword": "malaga",
            "brand": "acme",
            "user_id": IDENTITY,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"analysis": "Looks good"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnalysisClient::new(api_for(&server));
    let analysis = client
        .analyze(&entry(), "malaga", "acme", IDENTITY)
        .await
        .unwrap();

    assert_eq!(analysis, "Looks good");
}

#[tokio::test]
async fn test_analyze_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "model unavailable",
        })))
        .mount(&server)
        .await;

    let client = AnalysisClient::new(api_for(&server));
    let error = client
        .analyze(&entry(), "", "", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Unknown);
    assert_eq!(error.to_string(), "model unavailable");
}

#[tokio::test]
async fn test_analyze_non_success_status_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;

    let client = AnalysisClient::new(api_for(&server));
    let error = client
        .analyze(&entry(), "", "", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Unknown error");
}

#[tokio::test]
async fn test_analyze_success_without_data_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&server)
        .await;

    let client = AnalysisClient::new(api_for(&server));
    let error = client
        .analyze(&entry(), "", "", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Unknown);
}

#[tokio::test]
async fn test_analyze_rate_limit_message_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"message": "Daily limit reached"})),
        )
        .mount(&server)
        .await;

    let client = AnalysisClient::new(api_for(&server));
    let error = client
        .analyze(&entry(), "", "", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RateLimit);
    assert_eq!(error.to_string(), "Daily limit reached");
}

#[tokio::test]
async fn test_analyze_rate_limit_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = AnalysisClient::new(api_for(&server));
    let error = client
        .analyze(&entry(), "", "", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "You have reached the daily usage limit");
}

#[tokio::test]
async fn test_analyze_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = AnalysisClient::new(api_for(&server));
    let error = client
        .analyze(&entry(), "", "", IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Server);
    assert_eq!(error.to_string(), "Unknown error");
}

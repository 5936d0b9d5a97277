//! Proxy client against a stubbed proxy.

use serde_json::json;
use truthlens_client::{probe_model, ClientError, ProxyClient};
use truthlens_core::VerdictLabel;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_verify_posts_claim_and_llm_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .and(body_json(json!({
            "claim": "Water is wet",
            "llmUrl": "http://localhost:8081/v1/chat/completions"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "claim": "Water is wet",
            "rating": 5,
            "verdict": "Verified True",
            "explanation": "Confirmed by sources",
            "ual": "did:dkg:otp:2043/0x1/1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProxyClient::new(server.uri());
    let result = client
        .verify("Water is wet", Some("http://localhost:8081/v1/chat/completions"))
        .await
        .unwrap();

    assert_eq!(result.rating.value(), 5);
    assert_eq!(result.verdict, VerdictLabel::VerifiedTrue);
    assert_eq!(result.ledger_id.unwrap().as_str(), "did:dkg:otp:2043/0x1/1");
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Missing 'claim' field",
            "kind": "invalid_input",
            "request_id": "r"
        })))
        .mount(&server)
        .await;

    let err = ProxyClient::new(server.uri())
        .verify("", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Server(_)));
    assert_eq!(err.to_string(), "Missing 'claim' field");
}

#[tokio::test]
async fn test_server_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = ProxyClient::new(server.uri())
        .verify("claim", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Server Error: 500");
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    assert!(ProxyClient::new(format!("{}/", server.uri())).health().await);
    assert!(!ProxyClient::new("http://127.0.0.1:9").health().await);
}

#[tokio::test]
async fn test_probe_model() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(probe_model(&format!("{}/v1/chat/completions", server.uri())).await);
}

#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test — panics are the assertion mechanism")]

use axum::http::StatusCode;
use axum_test::TestServer;
use relay_core::{build_relay_router, AppState};
use relay_types::{PollPolicy, RelayConfig, UpstreamConfig};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUBMIT_PATH: &str = "/workflows/accounts/fireworks/models/flux-kontext-pro";
const RESULT_PATH: &str = "/workflows/accounts/fireworks/models/flux-kontext-pro/get_result";

fn test_server(upstream: &MockServer) -> TestServer {
    let config = RelayConfig {
        upstream: UpstreamConfig {
            base_url: upstream.uri(),
            api_key: "test-key".to_string(),
            ..UpstreamConfig::default()
        },
        poll: PollPolicy { max_attempts: 3, initial_delay_ms: 1, max_delay_ms: 2, ..PollPolicy::default() },
        ..RelayConfig::default()
    };
    let state = AppState::from_config(&config).expect("state");
    TestServer::new(build_relay_router(state)).expect("test server")
}

#[tokio::test]
async fn test_health_endpoints() {
    let upstream = MockServer::start().await;
    let server = test_server(&upstream);

    for route in ["/health", "/healthz"] {
        let response = server.get(route).await;
        response.assert_status_ok();
        response.assert_json(&json!({"status": "ok"}));
    }

    let version: Value = server.get("/version").await.json();
    assert_eq!(version["cargo_version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_chat_route_success() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"messages": [{"role": "user", "content": "Tell me a joke"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": " Why did the crab cross the road? "}}]
        })))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream);

    let response = server.post("/chat").json(&json!({"userMessage": "Tell me a joke"})).await;

    response.assert_status_ok();
    response.assert_json(&json!({"botReply": "Why did the crab cross the road?"}));
}

#[tokio::test]
async fn test_chat_route_failure_is_generic() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "internal details"})))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream);

    let response = server.post("/chat").json(&json!({"userMessage": "hello"})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"error": "Something went wrong"}));
}

#[tokio::test]
async fn test_chat_route_rejects_missing_field() {
    let upstream = MockServer::start().await;
    let server = test_server(&upstream);

    let response = server.post("/chat").json(&json!({"message": "wrong key"})).await;

    assert!(response.status_code().is_client_error());
    assert!(upstream.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_generate_image_route_success() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(body_partial_json(json!({"prompt": "a castle", "width": 768, "height": 512})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"request_id": "job-1"})))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path(RESULT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Ready",
            "result": {"sample": "https://img.example/castle.png"}
        })))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream);

    let response = server.post("/generate-image").json(&json!({"prompt": "a castle", "width": 768})).await;

    response.assert_status_ok();
    response.assert_json(&json!({"imageUrl": "https://img.example/castle.png"}));
}

#[tokio::test]
async fn test_generate_image_route_remote_failure() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"request_id": "job-2"})))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path(RESULT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Error",
            "details": "model crashed"
        })))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream);

    let response = server.post("/generate-image").json(&json!({"prompt": "boom"})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Image generation failed",
        "details": "Generation failed: model crashed",
        "fullError": "model crashed"
    }));
}

#[tokio::test]
async fn test_generate_image_route_missing_id() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "accepted"})))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream);

    let response = server.post("/generate-image").json(&json!({"prompt": "x"})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Image generation failed",
        "details": "No request ID returned",
        "fullError": null
    }));
}

#[tokio::test]
async fn test_generate_image_route_timeout() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"request_id": "job-3"})))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path(RESULT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Pending"})))
        .expect(3)
        .mount(&upstream)
        .await;
    let server = test_server(&upstream);

    let response = server.post("/generate-image").json(&json!({"prompt": "slow"})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Image generation failed");
    assert!(body["details"]
        .as_str()
        .expect("details")
        .starts_with("Polling failed to return a successful result in time"));
    assert_eq!(body["fullError"], Value::Null);
}

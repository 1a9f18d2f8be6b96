//! Chat completions driver against a local stand-in for the provider API.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use sancho_bot::llm::{ChatCompletion, ChatCompletionsDriver, LlmError, LlmSettings, Message, Provider};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured {
    request: Arc<Mutex<Option<(HeaderMap, Value)>>>,
}

/// Serve `status` + `reply` on `/v1/chat/completions` and return the base URL.
async fn spawn_provider(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured = Captured::default();

    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(captured): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        *captured.request.lock().unwrap() = Some((headers, body));
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

fn settings(base_url: String, api_key: Option<&str>) -> LlmSettings {
    LlmSettings {
        provider: Provider::detect_from_url(&base_url),
        base_url,
        api_key: api_key.map(str::to_string),
        model: "llama3-70b-8192".to_string(),
        temperature: 0.7,
        max_tokens: 1000,
    }
}

#[tokio::test]
async fn test_complete_returns_first_choice() {
    let (base_url, captured) = spawn_provider(
        StatusCode::OK,
        json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "Hello, Sancho!" } }]
        }),
    )
    .await;

    let driver = ChatCompletionsDriver::new(settings(base_url, Some("gsk-test")));
    let reply = driver
        .complete(vec![Message::system("be helpful"), Message::user("hi")])
        .await
        .unwrap();

    assert_eq!(reply, "Hello, Sancho!");

    let (headers, body) = captured.request.lock().unwrap().clone().unwrap();
    assert_eq!(headers["authorization"], "Bearer gsk-test");
    assert_eq!(body["model"], "llama3-70b-8192");
    assert_eq!(body["max_tokens"], 1000);
    assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert_eq!(
        body["messages"],
        json!([
            { "role": "system", "content": "be helpful" },
            { "role": "user", "content": "hi" }
        ])
    );
}

#[tokio::test]
async fn test_no_api_key_sends_no_auth_header() {
    let (base_url, captured) = spawn_provider(
        StatusCode::OK,
        json!({ "choices": [{ "message": { "content": "ok" } }] }),
    )
    .await;

    let driver = ChatCompletionsDriver::new(settings(base_url, None));
    assert!(!driver.is_configured());
    driver.complete(vec![Message::user("hi")]).await.unwrap();

    let (headers, _) = captured.request.lock().unwrap().clone().unwrap();
    assert!(headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let (base_url, _) = spawn_provider(
        StatusCode::UNAUTHORIZED,
        json!({ "error": { "message": "Invalid API Key", "type": "invalid_request_error" } }),
    )
    .await;

    let driver = ChatCompletionsDriver::new(settings(base_url, Some("bad")));
    let err = driver.complete(vec![Message::user("hi")]).await.unwrap_err();

    match err {
        LlmError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API Key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let (base_url, _) = spawn_provider(StatusCode::OK, json!({ "choices": [] })).await;

    let driver = ChatCompletionsDriver::new(settings(base_url, Some("k")));
    let err = driver.complete(vec![Message::user("hi")]).await.unwrap_err();

    assert!(matches!(err, LlmError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let driver = ChatCompletionsDriver::new(settings(format!("http://{addr}"), None));
    let err = driver.complete(vec![Message::user("hi")]).await.unwrap_err();

    assert!(matches!(err, LlmError::Http(_)));
}

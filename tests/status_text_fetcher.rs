//! Status text client against a local stand-in for the generative service

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use orbital_countdown::services::{
    GenerativeConfig, GenerativeTextFetcher, StatusTextSource, FALLBACK_STATUS,
};

#[derive(Clone)]
struct FakeService {
    calls: Arc<AtomicUsize>,
    status: StatusCode,
    reply: Value,
    seen: Arc<std::sync::Mutex<Vec<(HashMap<String, String>, Option<String>, Value)>>>,
}

async fn generate(
    State(service): State<FakeService>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    service.calls.fetch_add(1, Ordering::SeqCst);
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    service.seen.lock().unwrap().push((query, key, body));
    (service.status, Json(service.reply.clone()))
}

async fn spawn_service(status: StatusCode, reply: Value) -> (String, FakeService) {
    let service = FakeService {
        calls: Arc::new(AtomicUsize::new(0)),
        status,
        reply,
        seen: Arc::new(std::sync::Mutex::new(Vec::new())),
    };
    let app = Router::new().fallback(generate).with_state(service.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/v1beta", addr), service)
}

fn config(api_base: String, api_key: Option<&str>) -> GenerativeConfig {
    GenerativeConfig {
        api_base,
        api_key: api_key.map(str::to_string),
        model: "test-model".to_string(),
        max_output_tokens: 48,
        temperature: 0.7,
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn missing_key_returns_fallback_without_calling() {
    let (base, service) = spawn_service(StatusCode::OK, json!({})).await;
    let fetcher = GenerativeTextFetcher::new(config(base.clone(), None));

    assert_eq!(fetcher.fetch(120).await, FALLBACK_STATUS);

    let empty_key = GenerativeTextFetcher::new(config(base, Some("")));
    assert_eq!(empty_key.fetch(120).await, FALLBACK_STATUS);

    assert_eq!(service.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn returns_generated_text() {
    let reply = json!({
        "candidates": [{ "content": { "parts": [{ "text": "Io drift nominal. Hold the line.\n" }] } }]
    });
    let (base, service) = spawn_service(StatusCode::OK, reply).await;
    let fetcher = GenerativeTextFetcher::new(config(base, Some("secret")));

    assert_eq!(fetcher.fetch(95).await, "Io drift nominal. Hold the line.");
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);

    let seen = service.seen.lock().unwrap();
    let (query, key, body) = &seen[0];
    assert_eq!(key.as_deref(), Some("secret"));
    assert!(query.get("key").is_none());
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 48);
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("1 minutes 35 seconds"));
}

#[tokio::test]
async fn service_error_returns_fallback() {
    let (base, service) =
        spawn_service(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })).await;
    let fetcher = GenerativeTextFetcher::new(config(base, Some("secret")));

    assert_eq!(fetcher.fetch(10).await, FALLBACK_STATUS);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_reply_returns_fallback() {
    let (base, _service) = spawn_service(StatusCode::OK, json!({ "candidates": [] })).await;
    let fetcher = GenerativeTextFetcher::new(config(base, Some("secret")));

    assert_eq!(fetcher.fetch(10).await, FALLBACK_STATUS);
}

#[tokio::test]
async fn unreachable_service_returns_fallback() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = GenerativeTextFetcher::new(config(format!("http://{}", addr), Some("secret")));
    assert_eq!(fetcher.fetch(10).await, FALLBACK_STATUS);
}

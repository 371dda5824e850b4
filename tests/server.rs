//! Integration tests for the HTTP API, health endpoint, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use genai_resolver::api::{ActivationResponse, ErrorBody};
use genai_resolver::config::snapshot::builtin_defaults;
use genai_resolver::config::sources::memory::MemorySource;
use genai_resolver::config::store::ConfigStore;
use genai_resolver::config::ConfigResolver;
use genai_resolver::health::HealthResponse;
use genai_resolver::server::{self, AppState};
use serde_json::{json, Value};

const TUNED: &str = r#"{"temperature":0.5,"topP":0.9,"topK":10,"maxOutputTokens":256}"#;

async fn start_test_server(
    source: MemorySource,
) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let store = Arc::new(ConfigStore::new(
        ConfigResolver::new(Box::new(source), None),
        builtin_defaults(),
    ));
    store.fetch_and_activate().await.unwrap();

    let state = Arc::new(AppState::new(store, "test"));
    let router = server::build_router(state, 1_048_576);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

fn model_a() -> MemorySource {
    MemorySource::from_pairs([("model_name", "model-A"), ("generation_config", TUNED)])
}

#[tokio::test]
async fn health_endpoint_returns_healthy() {
    let (addr, shutdown) = start_test_server(model_a()).await;

    let url = format!("http://{addr}/health");
    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status(), 200);

    let health: HealthResponse = resp.json().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.config.source, "memory");
    assert_eq!(health.config.namespace, "test");
    assert_eq!(health.config.model_name, "model-A");
    assert_eq!(health.config.activation, 1);
    assert!(!health.config.pending);
    assert_eq!(health.stats.fetches, 1);
    assert_eq!(health.stats.clients_created, 0);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn chat_client_uses_remote_values() {
    let (addr, shutdown) = start_test_server(model_a()).await;

    let body: Value = reqwest::get(format!("http://{addr}/clients/chat"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["kind"], "chat");
    assert_eq!(body["modelName"], "model-A");
    assert_eq!(body["generationConfig"]["topK"], 10);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
    assert_eq!(body["activation"], 1);
    assert!(body.get("tools").is_none());

    let health: HealthResponse = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.stats.clients_created, 1);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn functions_chat_is_pinned() {
    let (addr, shutdown) = start_test_server(model_a()).await;

    let body: Value = reqwest::get(format!("http://{addr}/clients/functions_chat"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["modelName"], "gemini-1.5-pro-preview-0514");
    assert!(body.get("generationConfig").is_none());
    assert_eq!(
        body["tools"][0]["functionDeclarations"][0]["name"],
        "upperCase"
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unknown_kind_returns_404() {
    let (addr, shutdown) = start_test_server(model_a()).await;

    let resp = reqwest::get(format!("http://{addr}/clients/translator"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: ErrorBody = resp.json().await.unwrap();
    assert!(body.error.contains("translator"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn upper_case_function_runs_locally() {
    let (addr, shutdown) = start_test_server(model_a()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!(
            "http://{addr}/clients/functions_chat/functions/upperCase"
        ))
        .json(&json!({ "input": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "response": "HELLO" }));

    let resp = client
        .post(format!("http://{addr}/clients/chat/functions/upperCase"))
        .json(&json!({ "input": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn fetch_endpoint_activates_new_values() {
    let source = model_a();
    let (addr, shutdown) = start_test_server(source.clone()).await;
    let client = reqwest::Client::new();

    source.set("model_name", "model-B");
    let activation: ActivationResponse = client
        .post(format!("http://{addr}/config/fetch"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(activation.activated);
    assert_eq!(activation.activation, 2);
    assert_eq!(activation.model_name, "model-B");

    // Nothing pending any more
    let activation: ActivationResponse = client
        .post(format!("http://{addr}/config/activate"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!activation.activated);
    assert_eq!(activation.activation, 2);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unavailable_source_returns_bad_gateway() {
    let source = model_a();
    let (addr, shutdown) = start_test_server(source.clone()).await;

    source.set_unavailable(true);
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/config/fetch"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);

    // The active snapshot is untouched
    let body: Value = reqwest::get(format!("http://{addr}/clients/summarize"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["modelName"], "model-A");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn graceful_shutdown_works() {
    let (addr, shutdown) = start_test_server(model_a()).await;

    let url = format!("http://{addr}/health");
    assert!(reqwest::get(&url).await.is_ok());

    let _ = shutdown.send(());
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let result = reqwest::get(&url).await;
    assert!(result.is_err());
}

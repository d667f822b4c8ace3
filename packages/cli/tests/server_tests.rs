// ABOUTME: Integration tests for the assembled server application
// ABOUTME: Checks CORS behaviour and that the full middleware stack serves the API

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use serial_test::serial;

use todolux_cli::{build_app, cors_layer, log_filter, ServerError};
use todolux_storage::DbState;

async fn spawn_app(cors_origin: Option<&str>) -> String {
    let db = DbState::in_memory()
        .await
        .expect("Failed to create in-memory database");
    let app = build_app(db, cors_origin).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_any_origin_by_default() {
    let base_url = spawn_app(None).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", base_url))
        .header("Origin", "http://somewhere.test")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_configured_origin_is_echoed() {
    let base_url = spawn_app(Some("https://app.example.com")).await;

    let response = reqwest::Client::new()
        .get(format!("{}/todos", base_url))
        .header("Origin", "https://app.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://app.example.com"
    );
}

#[tokio::test]
async fn test_full_stack_create_and_list() {
    let base_url = spawn_app(None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/todos", base_url))
        .json(&json!({ "text": "Write report", "priority": "high" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();

    let list: Vec<Value> = client
        .get(format!("{}/todos", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], created["id"]);
}

#[test]
fn test_invalid_cors_origin_rejected() {
    let result = cors_layer(Some("bad\norigin"));
    assert!(matches!(result, Err(ServerError::InvalidCorsOrigin(_))));
}

#[test]
#[serial]
fn test_log_filter_follows_rust_log() {
    std::env::set_var("RUST_LOG", "debug");
    assert_eq!(log_filter().to_string(), "debug");

    std::env::remove_var("RUST_LOG");
    assert_eq!(log_filter().to_string(), "info");
}

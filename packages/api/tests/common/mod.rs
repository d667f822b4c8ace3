// ABOUTME: Common test utilities for API integration tests
// ABOUTME: Provides test server setup on an in-memory database and HTTP helpers

use todolux_api::create_router;
use todolux_storage::DbState;

/// Test context containing server URL and database state
pub struct TestContext {
    pub base_url: String,
    #[allow(dead_code)]
    pub db: DbState,
}

/// Spawn the API on a random port backed by a fresh in-memory database
pub async fn setup_test_server() -> TestContext {
    let db = DbState::in_memory()
        .await
        .expect("Failed to create in-memory database");

    let app = create_router(db.clone());

    // Bind to random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestContext { base_url, db }
}

/// Helper to make GET requests
pub async fn get(base_url: &str, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make POST requests with JSON body
pub async fn post_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make body-less POST requests
#[allow(dead_code)]
pub async fn post(base_url: &str, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make PUT requests with JSON body
#[allow(dead_code)]
pub async fn put_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    reqwest::Client::new()
        .put(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make PUT request")
}

/// Helper to make body-less PUT requests
#[allow(dead_code)]
pub async fn put(base_url: &str, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .put(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make PUT request")
}

/// Helper to make DELETE requests
#[allow(dead_code)]
pub async fn delete(base_url: &str, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .delete(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make DELETE request")
}

/// Create a todo through the API and return its JSON body
#[allow(dead_code)]
pub async fn create_todo(base_url: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(base_url, "/todos", &body).await;
    assert_eq!(response.status(), 201);
    response.json().await.unwrap()
}

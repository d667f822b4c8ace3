// ABOUTME: HTTP API client for communicating with the TodoLux server
// ABOUTME: One async method per endpoint, decoding error bodies into ClientError

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use todolux_core::{Acknowledgement, Todo, TodoCreateInput, TodoUpdateInput};

use crate::error::{ClientError, ClientResult};

/// HTTP API client for the todo endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check server health
    pub async fn health_check(&self) -> ClientResult<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }

    /// Get all active todos
    pub async fn list_todos(&self) -> ClientResult<Vec<Todo>> {
        let response = self
            .client
            .get(format!("{}/todos", self.base_url))
            .send()
            .await?;

        decode(response).await
    }

    /// Get all archived todos
    pub async fn list_archived_todos(&self) -> ClientResult<Vec<Todo>> {
        let response = self
            .client
            .get(format!("{}/todos/archived", self.base_url))
            .send()
            .await?;

        decode(response).await
    }

    pub async fn create_todo(&self, input: &TodoCreateInput) -> ClientResult<Todo> {
        let response = self
            .client
            .post(format!("{}/todos", self.base_url))
            .json(input)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn update_todo(&self, todo_id: &str, input: &TodoUpdateInput) -> ClientResult<Todo> {
        let response = self
            .client
            .put(self.todo_url("", todo_id))
            .json(input)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn toggle_todo(&self, todo_id: &str) -> ClientResult<Todo> {
        self.put_empty(self.todo_url("toggle/", todo_id)).await
    }

    pub async fn archive_todo(&self, todo_id: &str) -> ClientResult<Todo> {
        self.put_empty(self.todo_url("archive/", todo_id)).await
    }

    pub async fn restore_todo(&self, todo_id: &str) -> ClientResult<Todo> {
        self.put_empty(self.todo_url("restore/", todo_id)).await
    }

    pub async fn archive_completed(&self) -> ClientResult<Acknowledgement> {
        let response = self
            .client
            .post(format!("{}/todos/archive/completed", self.base_url))
            .send()
            .await?;

        decode(response).await
    }

    pub async fn clear_archive(&self) -> ClientResult<Acknowledgement> {
        let response = self
            .client
            .delete(format!("{}/todos/archive/clear", self.base_url))
            .send()
            .await?;

        decode(response).await
    }

    async fn put_empty(&self, url: String) -> ClientResult<Todo> {
        let response = self.client.put(url).send().await?;
        decode(response).await
    }

    fn todo_url(&self, action: &str, todo_id: &str) -> String {
        format!(
            "{}/todos/{}{}",
            self.base_url,
            action,
            urlencoding::encode(todo_id)
        )
    }
}

/// Decode a success body, or turn the server's `{error}` body into a ClientError
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(text);

    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
        _ => Err(ClientError::Api {
            status: status.as_u16(),
            message,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_todo_url_encodes_id() {
        let client = ApiClient::new("http://localhost:5000");
        assert_eq!(
            client.todo_url("toggle/", "todo-abc"),
            "http://localhost:5000/todos/toggle/todo-abc"
        );
        assert_eq!(
            client.todo_url("", "a b/c"),
            "http://localhost:5000/todos/a%20b%2Fc"
        );
    }
}

// ABOUTME: HTTP request handlers for todo operations
// ABOUTME: Handles listing, CRUD, toggle, archive/restore and bulk archive endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use todolux_core::{
    parse_due_date, serde_utils::double_option, Acknowledgement, Priority, TodoCreateInput,
    TodoUpdateInput, ValidationError,
};
use todolux_storage::DbState;

use crate::error::ApiResult;

/// Blank strings mean "no due date"; anything else must parse
fn parse_due_field(value: Option<String>) -> Result<Option<DateTime<Utc>>, ValidationError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse_due_date(&raw)
            .map(Some)
            .ok_or(ValidationError::InvalidDueDate(raw)),
        _ => Ok(None),
    }
}

fn parse_priority_field(value: Option<String>) -> Result<Option<Priority>, ValidationError> {
    value.map(|raw| raw.parse()).transpose()
}

/// List all active (non-archived) todos, newest first
pub async fn list_todos(State(db): State<DbState>) -> ApiResult<impl IntoResponse> {
    info!("Listing active todos");

    let todos = db.todo_storage.list_todos(false).await?;
    Ok(Json(todos))
}

/// List all archived todos, newest first
pub async fn list_archived_todos(State(db): State<DbState>) -> ApiResult<impl IntoResponse> {
    info!("Listing archived todos");

    let todos = db.todo_storage.list_todos(true).await?;
    Ok(Json(todos))
}

/// Request body for creating a todo
#[derive(Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub text: String,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Create a new todo
pub async fn create_todo(
    State(db): State<DbState>,
    Json(request): Json<CreateTodoRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating todo '{}'", request.text);

    let input = TodoCreateInput {
        text: request.text,
        priority: parse_priority_field(request.priority)?,
        due: parse_due_field(request.due)?,
        tags: request.tags,
    };

    let todo = db.todo_storage.create_todo(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Request body for updating a todo. Absent keys are left untouched.
#[derive(Deserialize)]
pub struct UpdateTodoRequest {
    pub text: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

/// Update the text, priority, due date and/or tags of a todo
pub async fn update_todo(
    State(db): State<DbState>,
    Path(todo_id): Path<String>,
    Json(request): Json<UpdateTodoRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Updating todo: {}", todo_id);

    let input = TodoUpdateInput {
        text: request.text,
        priority: parse_priority_field(request.priority)?,
        due: request.due.map(parse_due_field).transpose()?,
        tags: request.tags,
    };

    let todo = db.todo_storage.update_todo(&todo_id, input).await?;
    Ok(Json(todo))
}

/// Flip the completed flag of a todo
pub async fn toggle_todo(
    State(db): State<DbState>,
    Path(todo_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!("Toggling todo: {}", todo_id);

    let todo = db.todo_storage.toggle_todo(&todo_id).await?;
    Ok(Json(todo))
}

/// Archive a todo (also marks it not completed)
pub async fn archive_todo(
    State(db): State<DbState>,
    Path(todo_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!("Archiving todo: {}", todo_id);

    let todo = db.todo_storage.archive_todo(&todo_id).await?;
    Ok(Json(todo))
}

/// Restore an archived todo
pub async fn restore_todo(
    State(db): State<DbState>,
    Path(todo_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!("Restoring todo: {}", todo_id);

    let todo = db.todo_storage.restore_todo(&todo_id).await?;
    Ok(Json(todo))
}

/// Archive every completed todo
pub async fn archive_completed(State(db): State<DbState>) -> ApiResult<impl IntoResponse> {
    info!("Archiving completed todos");

    let count = db.todo_storage.archive_completed().await?;
    Ok(Json(Acknowledgement::ok(format!(
        "Archived {} completed todo(s)",
        count
    ))))
}

/// Permanently delete every archived todo
pub async fn clear_archive(State(db): State<DbState>) -> ApiResult<impl IntoResponse> {
    info!("Clearing archive");

    let count = db.todo_storage.clear_archive().await?;
    Ok(Json(Acknowledgement::ok(format!(
        "Archive cleared, {} todo(s) deleted",
        count
    ))))
}

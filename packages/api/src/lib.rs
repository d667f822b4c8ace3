// ABOUTME: HTTP API layer for TodoLux providing REST endpoints and routing
// ABOUTME: Maps each endpoint onto a single todo storage operation

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use todolux_storage::DbState;

pub mod error;
pub mod health;
pub mod todos_handlers;

pub use error::{ApiResult, AppError};

/// Creates the todos API router
pub fn create_todos_router() -> Router<DbState> {
    Router::new()
        .route(
            "/todos",
            get(todos_handlers::list_todos).post(todos_handlers::create_todo),
        )
        .route("/todos/archived", get(todos_handlers::list_archived_todos))
        .route("/todos/{todo_id}", put(todos_handlers::update_todo))
        .route("/todos/toggle/{todo_id}", put(todos_handlers::toggle_todo))
        .route("/todos/archive/{todo_id}", put(todos_handlers::archive_todo))
        .route("/todos/restore/{todo_id}", put(todos_handlers::restore_todo))
        // Bulk operations
        .route(
            "/todos/archive/completed",
            post(todos_handlers::archive_completed),
        )
        .route("/todos/archive/clear", delete(todos_handlers::clear_archive))
}

/// Creates the full application router with state attached
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(create_todos_router())
        .with_state(db)
}

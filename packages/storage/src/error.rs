// ABOUTME: Storage error type shared by every storage operation
// ABOUTME: Wraps sqlx, migration, IO and validation failures plus a typed not-found

use thiserror::Error;
use todolux_core::ValidationError;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Todo {0} not found")]
    NotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

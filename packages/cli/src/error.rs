// ABOUTME: Errors raised while bootstrapping the HTTP server

use thiserror::Error;

use crate::config::ConfigError;
use todolux_storage::StorageError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

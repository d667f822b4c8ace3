// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the todo storage

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::todos::TodoStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub todo_storage: Arc<TodoStorage>,
}

impl DbState {
    /// Create new database state from an already migrated SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let todo_storage = Arc::new(TodoStorage::new(pool.clone()));
        Self { pool, todo_storage }
    }

    /// Connect to `database_url`, apply pragmas and run migrations
    pub async fn init(database_url: &str) -> Result<Self, StorageError> {
        debug!("Connecting to database: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Sqlx)?
            .create_if_missing(true);

        // Ensure parent directory exists for file-backed databases
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(StorageError::Io)?;
            }
        }

        // Configure connection pool
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        // Configure SQLite settings
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }

    /// Migrated in-memory database on a single pinned connection.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool
    /// must never open a second connection or recycle the first.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(StorageError::Sqlx)?;

        run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(StorageError::Migration)?;

    debug!("Database migrations completed");
    Ok(())
}

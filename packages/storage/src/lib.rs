// ABOUTME: Data layer and persistence for TodoLux
// ABOUTME: SQLite pool setup, embedded migrations and the todo storage

pub mod db;
pub mod error;
pub mod todos;

pub use db::DbState;
pub use error::{StorageError, StorageResult};
pub use todos::TodoStorage;

// ABOUTME: Todo storage layer using SQLite
// ABOUTME: Handles CRUD operations for todos with archive, restore and bulk support

use chrono::{DateTime, Utc};
use sqlx::{types::Json, Row, SqlitePool};
use tracing::debug;

use todolux_core::{
    generate_todo_id, validate_create_input, validate_update_input, Priority, Todo,
    TodoCreateInput, TodoUpdateInput,
};

use crate::error::StorageError;

pub struct TodoStorage {
    pool: SqlitePool,
}

impl TodoStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List todos with the given archive flag, newest first
    pub async fn list_todos(&self, archived: bool) -> Result<Vec<Todo>, StorageError> {
        debug!("Fetching todos (archived: {})", archived);

        let rows = sqlx::query(
            "SELECT * FROM todos WHERE is_archived = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(archived)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| self.row_to_todo(row))
            .collect::<Result<Vec<_>, _>>()
    }

    /// Get a single todo by ID
    pub async fn get_todo(&self, todo_id: &str) -> Result<Todo, StorageError> {
        debug!("Fetching todo: {}", todo_id);

        let row = sqlx::query("SELECT * FROM todos WHERE id = ?")
            .bind(todo_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(r) => self.row_to_todo(&r),
            None => Err(StorageError::NotFound(todo_id.to_string())),
        }
    }

    /// Create a new todo, filling in defaults for omitted fields
    pub async fn create_todo(&self, input: TodoCreateInput) -> Result<Todo, StorageError> {
        validate_create_input(&input)?;

        let todo_id = generate_todo_id();
        let now = Utc::now();
        let priority = input.priority.unwrap_or_default();
        let tags = input.tags.unwrap_or_default();

        debug!("Creating todo: {} (priority: {})", todo_id, priority);

        sqlx::query(
            r#"
            INSERT INTO todos (id, text, completed, created_at, due, priority, tags, is_archived)
            VALUES (?, ?, 0, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(&todo_id)
        .bind(&input.text)
        .bind(now)
        .bind(input.due)
        .bind(priority)
        .bind(Json(tags))
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get_todo(&todo_id).await
    }

    /// Overwrite only the fields present in the input
    pub async fn update_todo(
        &self,
        todo_id: &str,
        input: TodoUpdateInput,
    ) -> Result<Todo, StorageError> {
        validate_update_input(&input)?;

        debug!("Updating todo: {}", todo_id);

        // Build update query dynamically based on provided fields
        let mut query_parts = Vec::new();

        if input.text.is_some() {
            query_parts.push("text = ?");
        }
        if input.priority.is_some() {
            query_parts.push("priority = ?");
        }
        if input.due.is_some() {
            query_parts.push("due = ?");
        }
        if input.tags.is_some() {
            query_parts.push("tags = ?");
        }

        if query_parts.is_empty() {
            return self.get_todo(todo_id).await;
        }

        let query_str = format!("UPDATE todos SET {} WHERE id = ?", query_parts.join(", "));
        let mut query = sqlx::query(&query_str);

        // Bind parameters in the same order
        if let Some(text) = input.text {
            query = query.bind(text);
        }
        if let Some(priority) = input.priority {
            query = query.bind(priority);
        }
        if let Some(due) = input.due {
            query = query.bind(due);
        }
        if let Some(tags) = input.tags {
            query = query.bind(Json(tags));
        }

        query = query.bind(todo_id);

        let result = query
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(todo_id.to_string()));
        }

        self.get_todo(todo_id).await
    }

    /// Flip the completed flag
    pub async fn toggle_todo(&self, todo_id: &str) -> Result<Todo, StorageError> {
        debug!("Toggling todo: {}", todo_id);

        self.update_single(todo_id, "UPDATE todos SET completed = NOT completed WHERE id = ?")
            .await
    }

    /// Archive a todo (soft delete). Always clears the completed flag.
    pub async fn archive_todo(&self, todo_id: &str) -> Result<Todo, StorageError> {
        debug!("Archiving todo: {}", todo_id);

        self.update_single(
            todo_id,
            "UPDATE todos SET is_archived = 1, completed = 0 WHERE id = ?",
        )
        .await
    }

    /// Bring a todo back from the archive, leaving completed as it is
    pub async fn restore_todo(&self, todo_id: &str) -> Result<Todo, StorageError> {
        debug!("Restoring todo: {}", todo_id);

        self.update_single(todo_id, "UPDATE todos SET is_archived = 0 WHERE id = ?")
            .await
    }

    /// Archive every completed, non-archived todo. Returns the number archived.
    ///
    /// Unlike [`archive_todo`](Self::archive_todo) this keeps `completed` set.
    pub async fn archive_completed(&self) -> Result<u64, StorageError> {
        debug!("Archiving all completed todos");

        let result =
            sqlx::query("UPDATE todos SET is_archived = 1 WHERE completed = 1 AND is_archived = 0")
                .execute(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Permanently delete every archived todo. Returns the number deleted.
    pub async fn clear_archive(&self) -> Result<u64, StorageError> {
        debug!("Clearing archived todos");

        let result = sqlx::query("DELETE FROM todos WHERE is_archived = 1")
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    async fn update_single(&self, todo_id: &str, sql: &str) -> Result<Todo, StorageError> {
        let result = sqlx::query(sql)
            .bind(todo_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(todo_id.to_string()));
        }

        self.get_todo(todo_id).await
    }

    /// Convert a database row to a Todo
    fn row_to_todo(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Todo, StorageError> {
        let tags: Json<Vec<String>> = row.try_get("tags").map_err(StorageError::Sqlx)?;
        let priority: Priority = row.try_get("priority").map_err(StorageError::Sqlx)?;
        let due: Option<DateTime<Utc>> = row.try_get("due").map_err(StorageError::Sqlx)?;

        Ok(Todo {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            text: row.try_get("text").map_err(StorageError::Sqlx)?,
            completed: row.try_get("completed").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            due,
            priority,
            tags: tags.0,
            is_archived: row.try_get("is_archived").map_err(StorageError::Sqlx)?,
        })
    }
}

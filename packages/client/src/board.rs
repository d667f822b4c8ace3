// ABOUTME: Client-side state of the todo board
// ABOUTME: Keeps the active and archived lists in step with the server by echoing each response

use tracing::{debug, error};

use todolux_core::{Todo, TodoCreateInput, TodoUpdateInput};

use crate::client::ApiClient;
use crate::view::{apply_view, SortOrder, StatusFilter};

/// Active and archived lists plus the current view settings.
///
/// Every mutating method calls the server first and only then applies the
/// returned record locally. Failures are logged and leave state untouched;
/// the returned `bool` reports whether the change was applied.
#[derive(Debug)]
pub struct TodoBoard {
    client: ApiClient,
    todos: Vec<Todo>,
    archived: Vec<Todo>,
    query: String,
    filter: StatusFilter,
    sort: SortOrder,
}

impl TodoBoard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            archived: Vec::new(),
            query: String::new(),
            filter: StatusFilter::default(),
            sort: SortOrder::default(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn archived(&self) -> &[Todo] {
        &self.archived
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Changing the sort order re-fetches the active list. Returns `false`
    /// only when that fetch fails.
    pub async fn set_sort(&mut self, sort: SortOrder) -> bool {
        if self.sort == sort {
            return true;
        }
        self.sort = sort;
        self.refresh().await
    }

    /// Active todos after applying the query, filter and sort order
    pub fn visible(&self) -> Vec<&Todo> {
        apply_view(&self.todos, &self.query, self.filter, self.sort)
    }

    /// Reload the active list from the server
    pub async fn refresh(&mut self) -> bool {
        match self.client.list_todos().await {
            Ok(todos) => {
                debug!("Loaded {} active todos", todos.len());
                self.todos = todos;
                true
            }
            Err(e) => {
                error!("Failed to load todos: {}", e);
                false
            }
        }
    }

    /// Reload the archived list from the server
    pub async fn refresh_archived(&mut self) -> bool {
        match self.client.list_archived_todos().await {
            Ok(archived) => {
                debug!("Loaded {} archived todos", archived.len());
                self.archived = archived;
                true
            }
            Err(e) => {
                error!("Failed to load archived todos: {}", e);
                false
            }
        }
    }

    /// Create a todo. Blank text is ignored without contacting the server.
    pub async fn add(&mut self, input: TodoCreateInput) -> bool {
        if input.text.trim().is_empty() {
            return false;
        }

        match self.client.create_todo(&input).await {
            Ok(todo) => {
                self.todos.insert(0, todo);
                true
            }
            Err(e) => {
                error!("Failed to add todo: {}", e);
                false
            }
        }
    }

    pub async fn update(&mut self, todo_id: &str, input: TodoUpdateInput) -> bool {
        match self.client.update_todo(todo_id, &input).await {
            Ok(todo) => {
                self.replace(todo);
                true
            }
            Err(e) => {
                error!("Failed to update todo {}: {}", todo_id, e);
                false
            }
        }
    }

    pub async fn toggle(&mut self, todo_id: &str) -> bool {
        match self.client.toggle_todo(todo_id).await {
            Ok(todo) => {
                self.replace(todo);
                true
            }
            Err(e) => {
                error!("Failed to toggle todo {}: {}", todo_id, e);
                false
            }
        }
    }

    /// Archive a todo. It leaves the active list; the archived list is only
    /// refreshed on demand.
    pub async fn archive(&mut self, todo_id: &str) -> bool {
        match self.client.archive_todo(todo_id).await {
            Ok(todo) => {
                self.todos.retain(|t| t.id != todo.id);
                true
            }
            Err(e) => {
                error!("Failed to archive todo {}: {}", todo_id, e);
                false
            }
        }
    }

    /// Restore an archived todo back into the active list.
    pub async fn restore(&mut self, todo_id: &str) -> bool {
        match self.client.restore_todo(todo_id).await {
            Ok(todo) => {
                self.archived.retain(|t| t.id != todo.id);
                self.todos.retain(|t| t.id != todo.id);
                let position = self
                    .todos
                    .iter()
                    .position(|t| t.created_at < todo.created_at)
                    .unwrap_or(self.todos.len());
                self.todos.insert(position, todo);
                true
            }
            Err(e) => {
                error!("Failed to restore todo {}: {}", todo_id, e);
                false
            }
        }
    }

    pub async fn archive_completed(&mut self) -> bool {
        match self.client.archive_completed().await {
            Ok(ack) => {
                debug!("{}", ack.message);
                self.todos.retain(|t| !t.completed);
                true
            }
            Err(e) => {
                error!("Failed to archive completed todos: {}", e);
                false
            }
        }
    }

    pub async fn clear_archive(&mut self) -> bool {
        match self.client.clear_archive().await {
            Ok(ack) => {
                debug!("{}", ack.message);
                self.archived.clear();
                true
            }
            Err(e) => {
                error!("Failed to clear archive: {}", e);
                false
            }
        }
    }

    /// Move the item at `from` to `to` in the local active list. Not persisted.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.todos.len() || to >= self.todos.len() {
            return false;
        }
        let todo = self.todos.remove(from);
        self.todos.insert(to, todo);
        true
    }

    /// Swap in the server's copy wherever the id is held locally
    fn replace(&mut self, todo: Todo) {
        let list = if todo.is_archived {
            &mut self.archived
        } else {
            &mut self.todos
        };
        if let Some(slot) = list.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }
}

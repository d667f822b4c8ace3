// ABOUTME: Core types, validation and utilities for TodoLux
// ABOUTME: Foundational package shared by the storage layer, the HTTP API and the client

pub mod serde_utils;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{Acknowledgement, Priority, Todo, TodoCreateInput, TodoUpdateInput};

// Re-export utilities
pub use utils::{generate_todo_id, parse_due_date, TODO_ID_PREFIX};

// Re-export validation
pub use validation::{validate_create_input, validate_update_input, ValidationError};

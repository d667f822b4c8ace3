// ABOUTME: Input validation for todo create and update requests
// ABOUTME: Only non-empty text is enforced; everything else is accepted as given

use thiserror::Error;

use crate::types::{TodoCreateInput, TodoUpdateInput};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Todo text is required")]
    EmptyText,
    #[error("Invalid due date: {0}")]
    InvalidDueDate(String),
    #[error("Invalid priority: {0} (expected low, medium or high)")]
    InvalidPriority(String),
}

pub fn validate_create_input(input: &TodoCreateInput) -> Result<(), ValidationError> {
    if input.text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(())
}

/// Text may be omitted on update, but not blanked.
pub fn validate_update_input(input: &TodoUpdateInput) -> Result<(), ValidationError> {
    match &input.text {
        Some(text) if text.trim().is_empty() => Err(ValidationError::EmptyText),
        _ => Ok(()),
    }
}

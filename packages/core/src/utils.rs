// ABOUTME: Shared utility functions for TodoLux
// ABOUTME: ID generation and lenient due date parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Prefix of every generated todo ID
pub const TODO_ID_PREFIX: &str = "todo-";

/// Generate a unique todo ID
pub fn generate_todo_id() -> String {
    format!("{}{}", TODO_ID_PREFIX, nanoid::nanoid!())
}

/// Parse a due date from RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD`.
///
/// Values without an offset are read as UTC; a bare date means midnight.
pub fn parse_due_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

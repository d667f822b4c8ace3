// ABOUTME: Client-side filtering and sorting of the todo list
// ABOUTME: Search query, completion filter and the four sort orders used by the board

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use todolux_core::Todo;

/// Completion filter applied to the active list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" | "todo" => Ok(StatusFilter::Pending),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => Err(format!(
                "Unknown filter '{}', expected all, pending or completed",
                other
            )),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Display order of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Priority,
    DueSoonest,
}

impl SortOrder {
    /// Todos without a due date sort after every dated one under `DueSoonest`.
    pub fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::Oldest => a.created_at.cmp(&b.created_at),
            SortOrder::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortOrder::DueSoonest => match (a.due, b.due) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "priority" => Ok(SortOrder::Priority),
            "due" | "due-soonest" => Ok(SortOrder::DueSoonest),
            other => Err(format!(
                "Unknown sort '{}', expected newest, oldest, priority or due",
                other
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Priority => "priority",
            SortOrder::DueSoonest => "due",
        };
        f.write_str(name)
    }
}

/// Case-insensitive substring match on the todo text. An empty query matches everything.
pub fn matches_query(todo: &Todo, query: &str) -> bool {
    query.is_empty() || todo.text.to_lowercase().contains(&query.to_lowercase())
}

/// Filter then stable-sort the given todos for display.
pub fn apply_view<'a>(
    todos: &'a [Todo],
    query: &str,
    filter: StatusFilter,
    sort: SortOrder,
) -> Vec<&'a Todo> {
    let mut visible: Vec<&Todo> = todos
        .iter()
        .filter(|todo| filter.matches(todo) && matches_query(todo, query))
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

use anyhow::{anyhow, bail};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use inquire::Confirm;

use todolux_client::{apply_view, ApiClient, SortOrder, StatusFilter, TodoBoard};
use todolux_core::{parse_due_date, Priority, Todo, TodoCreateInput, TodoUpdateInput};

#[derive(Subcommand)]
pub enum TodosCommands {
    /// List todos
    List {
        /// Only show todos whose text contains this (case-insensitive)
        #[arg(short, long, default_value = "")]
        query: String,
        /// Completion filter: all, pending or completed
        #[arg(short, long, default_value = "all")]
        filter: StatusFilter,
        /// Sort order: newest, oldest, priority or due
        #[arg(short, long, default_value = "newest")]
        sort: SortOrder,
        /// Show the archive instead of active todos
        #[arg(long)]
        archived: bool,
    },
    /// Add a new todo
    Add {
        /// Todo text
        text: String,
        /// Priority: low, medium or high
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(short, long)]
        due: Option<String>,
        /// Tag, may be repeated
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Edit an existing todo
    Edit {
        /// Todo ID to edit
        id: String,
        /// New text
        #[arg(long)]
        text: Option<String>,
        /// New priority
        #[arg(short, long)]
        priority: Option<Priority>,
        /// New due date (YYYY-MM-DD or RFC 3339)
        #[arg(short, long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// Replace the tags, may be repeated
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Toggle a todo between pending and completed
    Toggle {
        /// Todo ID to toggle
        id: String,
    },
    /// Move a todo to the archive
    Archive {
        /// Todo ID to archive
        id: String,
    },
    /// Bring a todo back from the archive
    Restore {
        /// Todo ID to restore
        id: String,
    },
    /// Archive every completed todo
    ArchiveCompleted,
    /// Permanently delete every archived todo
    ClearArchive {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_todos_command(command: TodosCommands, client: ApiClient) -> anyhow::Result<()> {
    match command {
        TodosCommands::List {
            query,
            filter,
            sort,
            archived,
        } => list_todos(client, query, filter, sort, archived).await,
        TodosCommands::Add {
            text,
            priority,
            due,
            tags,
        } => add_todo(&client, text, priority, due, tags).await,
        TodosCommands::Edit {
            id,
            text,
            priority,
            due,
            clear_due,
            tags,
        } => {
            let input = build_update_input(text, priority, due, clear_due, tags)?;
            edit_todo(&client, &id, input).await
        }
        TodosCommands::Toggle { id } => {
            let todo = client.toggle_todo(&id).await?;
            let state = if todo.completed { "completed" } else { "pending" };
            println!(
                "{}",
                format!("✅ '{}' marked as {}", todo.text, state).green()
            );
            Ok(())
        }
        TodosCommands::Archive { id } => {
            let todo = client.archive_todo(&id).await?;
            println!("{}", format!("📦 '{}' archived", todo.text).green());
            Ok(())
        }
        TodosCommands::Restore { id } => {
            let todo = client.restore_todo(&id).await?;
            println!("{}", format!("♻️  '{}' restored", todo.text).green());
            Ok(())
        }
        TodosCommands::ArchiveCompleted => {
            let ack = client.archive_completed().await?;
            println!("{}", format!("✅ {}", ack.message).green());
            Ok(())
        }
        TodosCommands::ClearArchive { yes } => clear_archive(&client, yes).await,
    }
}

async fn list_todos(
    client: ApiClient,
    query: String,
    filter: StatusFilter,
    sort: SortOrder,
    archived: bool,
) -> anyhow::Result<()> {
    let mut board = TodoBoard::new(client);
    board.set_query(query);
    board.set_filter(filter);

    let (title, visible) = if archived {
        if !board.refresh_archived().await {
            bail!("Failed to load archived todos from {}", board.client().base_url());
        }
        (
            "📦 Archived Todos",
            apply_view(board.archived(), board.query(), filter, sort),
        )
    } else {
        let loaded = if board.sort() == sort {
            board.refresh().await
        } else {
            board.set_sort(sort).await
        };
        if !loaded {
            bail!("Failed to load todos from {}", board.client().base_url());
        }
        ("📝 Todos", board.visible())
    };

    if visible.is_empty() {
        println!("{}", "No todos found".yellow());
        if !archived {
            println!("{}", "Use 'todolux add <text>' to create one".dimmed());
        }
        return Ok(());
    }

    println!("{}", title.blue().bold());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Text", "Status", "Priority", "Due", "Tags", "Created"]);

    for todo in &visible {
        table.add_row(todo_row(todo));
    }

    println!("{}", table);
    println!("Total: {} todos", visible.len().to_string().cyan());

    Ok(())
}

async fn add_todo(
    client: &ApiClient,
    text: String,
    priority: Option<Priority>,
    due: Option<String>,
    tags: Vec<String>,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        bail!("Todo text is required");
    }

    let input = TodoCreateInput {
        text,
        priority,
        due: due.as_deref().map(parse_due).transpose()?,
        tags: if tags.is_empty() { None } else { Some(tags) },
    };

    let todo = client.create_todo(&input).await?;
    println!("{}", format!("✅ Todo '{}' created", todo.text).green());
    println!("ID: {}", todo.id.cyan());

    Ok(())
}

async fn edit_todo(client: &ApiClient, id: &str, input: TodoUpdateInput) -> anyhow::Result<()> {
    let todo = client.update_todo(id, &input).await?;
    println!("{}", format!("✅ Todo '{}' updated", todo.text).green());
    print_todo_details(&todo);
    Ok(())
}

async fn clear_archive(client: &ApiClient, yes: bool) -> anyhow::Result<()> {
    let confirmed = if yes {
        true
    } else {
        Confirm::new("Permanently delete every archived todo?")
            .with_default(false)
            .prompt()?
    };

    if !confirmed {
        println!("{}", "Clear cancelled".yellow());
        return Ok(());
    }

    let ack = client.clear_archive().await?;
    println!("{}", format!("🗑️  {}", ack.message).green());
    Ok(())
}

fn build_update_input(
    text: Option<String>,
    priority: Option<Priority>,
    due: Option<String>,
    clear_due: bool,
    tags: Vec<String>,
) -> anyhow::Result<TodoUpdateInput> {
    let due = if clear_due {
        Some(None)
    } else {
        due.as_deref().map(parse_due).transpose()?.map(Some)
    };

    let input = TodoUpdateInput {
        text,
        priority,
        due,
        tags: if tags.is_empty() { None } else { Some(tags) },
    };

    if input.is_empty() {
        bail!("Nothing to update: pass --text, --priority, --due, --clear-due or --tag");
    }

    Ok(input)
}

fn parse_due(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_due_date(raw).ok_or_else(|| anyhow!("Invalid due date: {}", raw))
}

fn todo_row(todo: &Todo) -> Vec<String> {
    let status = if todo.completed { "Done" } else { "Pending" };
    let due = todo
        .due
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "—".to_string());
    let tags = if todo.tags.is_empty() {
        "—".to_string()
    } else {
        todo.tags.join(", ")
    };

    vec![
        todo.id.clone(),
        truncate(&todo.text, 40),
        status.to_string(),
        todo.priority.to_string(),
        due,
        truncate(&tags, 20),
        todo.created_at.format("%Y-%m-%d %H:%M").to_string(),
    ]
}

fn print_todo_details(todo: &Todo) {
    println!("{:<10} {}", "ID:".bold(), todo.id);
    println!("{:<10} {}", "Text:".bold(), todo.text);
    println!("{:<10} {}", "Priority:".bold(), todo.priority);
    if let Some(due) = todo.due {
        println!("{:<10} {}", "Due:".bold(), due.format("%Y-%m-%d"));
    }
    if !todo.tags.is_empty() {
        println!("{:<10} {}", "Tags:".bold(), todo.tags.join(", "));
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

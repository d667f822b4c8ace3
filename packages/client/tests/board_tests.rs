// ABOUTME: Integration tests for the client board against a live API server
// ABOUTME: Verifies that local state mirrors server responses and that failures leave it untouched

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use todolux_api::create_router;
use todolux_client::{ApiClient, ClientError, SortOrder, StatusFilter, TodoBoard};
use todolux_core::{Priority, TodoCreateInput, TodoUpdateInput};
use todolux_storage::DbState;

/// Spawn the API on a random port backed by a fresh in-memory database
async fn setup_board() -> TodoBoard {
    let db = DbState::in_memory()
        .await
        .expect("Failed to create in-memory database");
    let app = create_router(db);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TodoBoard::new(ApiClient::new(format!("http://{}", addr)))
}

fn texts(board: &TodoBoard) -> Vec<String> {
    board.todos().iter().map(|t| t.text.clone()).collect()
}

#[tokio::test]
async fn test_add_prepends_server_record() {
    let mut board = setup_board().await;

    assert!(board.add(TodoCreateInput::new("first")).await);
    assert!(board.add(TodoCreateInput::new("second")).await);

    assert_eq!(texts(&board), vec!["second", "first"]);
    assert!(board.todos()[0].id.starts_with("todo-"));
    assert_eq!(board.todos()[0].priority, Priority::Medium);
}

#[tokio::test]
async fn test_blank_add_is_noop() {
    let mut board = setup_board().await;

    assert!(!board.add(TodoCreateInput::new("   ")).await);
    assert!(board.todos().is_empty());

    assert!(board.refresh().await);
    assert!(board.todos().is_empty());
}

#[tokio::test]
async fn test_update_and_toggle_replace_by_id() {
    let mut board = setup_board().await;
    board.add(TodoCreateInput::new("keep")).await;
    board.add(TodoCreateInput::new("draft")).await;
    let id = board.todos()[0].id.clone();

    let input = TodoUpdateInput {
        text: Some("final".to_string()),
        priority: Some(Priority::High),
        due: Some(Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())),
        ..Default::default()
    };
    assert!(board.update(&id, input).await);
    assert_eq!(texts(&board), vec!["final", "keep"]);
    assert_eq!(board.todos()[0].priority, Priority::High);
    assert!(board.todos()[0].due.is_some());

    assert!(board.toggle(&id).await);
    assert!(board.todos()[0].completed);
    assert!(!board.todos()[1].completed);
}

#[tokio::test]
async fn test_archive_and_restore_move_between_lists() {
    let mut board = setup_board().await;
    board.add(TodoCreateInput::new("older")).await;
    board.add(TodoCreateInput::new("newer")).await;
    let older = board.todos()[1].id.clone();

    assert!(board.archive(&older).await);
    assert_eq!(texts(&board), vec!["newer"]);

    assert!(board.refresh_archived().await);
    assert_eq!(board.archived().len(), 1);
    assert!(board.archived()[0].is_archived);

    assert!(board.restore(&older).await);
    assert!(board.archived().is_empty());
    assert_eq!(texts(&board), vec!["newer", "older"]);
    assert!(!board.todos()[1].is_archived);
}

#[tokio::test]
async fn test_archive_completed_and_clear_archive() {
    let mut board = setup_board().await;
    board.add(TodoCreateInput::new("pending")).await;
    board.add(TodoCreateInput::new("done")).await;
    let done = board.todos()[0].id.clone();
    board.toggle(&done).await;

    assert!(board.archive_completed().await);
    assert_eq!(texts(&board), vec!["pending"]);

    board.refresh_archived().await;
    assert_eq!(board.archived().len(), 1);

    assert!(board.clear_archive().await);
    assert!(board.archived().is_empty());

    board.refresh_archived().await;
    assert!(board.archived().is_empty());
}

#[tokio::test]
async fn test_failed_calls_leave_state_untouched() {
    let mut board = setup_board().await;
    board.add(TodoCreateInput::new("only")).await;
    let before = board.todos().to_vec();

    assert!(!board.toggle("todo-missing").await);
    assert!(!board.archive("todo-missing").await);
    assert!(!board.restore("todo-missing").await);
    assert!(
        !board
            .update("todo-missing", TodoUpdateInput::default())
            .await
    );

    assert_eq!(board.todos(), before.as_slice());
}

#[tokio::test]
async fn test_unreachable_server_is_swallowed() {
    // Port 9 (discard) is not served by anything in the test environment
    let mut board = TodoBoard::new(ApiClient::new("http://127.0.0.1:9"));

    assert!(!board.refresh().await);
    assert!(!board.add(TodoCreateInput::new("offline")).await);
    assert!(!board.clear_archive().await);
    assert!(board.todos().is_empty());
}

#[tokio::test]
async fn test_view_settings_and_local_reorder() {
    let mut board = setup_board().await;
    board.add(TodoCreateInput::new("Buy milk")).await;
    board.add(TodoCreateInput::new("Walk dog")).await;
    let dog = board.todos()[0].id.clone();
    board.toggle(&dog).await;

    board.set_query("MIL");
    assert_eq!(board.visible().len(), 1);
    assert_eq!(board.visible()[0].text, "Buy milk");

    board.set_query("");
    board.set_filter(StatusFilter::Completed);
    assert_eq!(board.visible().len(), 1);
    assert_eq!(board.visible()[0].text, "Walk dog");

    board.set_filter(StatusFilter::All);
    board.set_sort(SortOrder::Oldest).await;
    assert_eq!(board.sort(), SortOrder::Oldest);
    assert_eq!(board.visible()[0].text, "Buy milk");

    assert!(board.reorder(0, 1));
    assert_eq!(texts(&board), vec!["Buy milk", "Walk dog"]);
    assert!(!board.reorder(0, 5));
}

#[tokio::test]
async fn test_client_maps_error_bodies() {
    let board = setup_board().await;
    let client = ApiClient::new(board_url(&board));

    match client.toggle_todo("todo-missing").await {
        Err(ClientError::NotFound(message)) => assert_eq!(message, "Todo todo-missing not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }

    match client.create_todo(&TodoCreateInput::new("")).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Todo text is required");
        }
        other => panic!("expected Api error, got {:?}", other),
    }

    assert!(client.health_check().await.unwrap());
}

fn board_url(board: &TodoBoard) -> String {
    board.client().base_url().to_string()
}

#[tokio::test]
async fn test_restore_of_active_todo_keeps_single_copy() {
    let mut board = setup_board().await;
    board.add(TodoCreateInput::new("one")).await;
    let id = board.todos()[0].id.clone();

    assert!(board.restore(&id).await);
    assert_eq!(texts(&board), vec!["one"]);

    let local = board.todos().to_vec();
    assert!(board.refresh().await);
    assert_eq!(board.todos(), local.as_slice());
}

#[tokio::test]
async fn test_update_and_toggle_echo_into_archived_list() {
    let mut board = setup_board().await;
    board.add(TodoCreateInput::new("one")).await;
    let id = board.todos()[0].id.clone();
    board.archive(&id).await;
    board.refresh_archived().await;

    let input = TodoUpdateInput {
        text: Some("renamed".to_string()),
        ..Default::default()
    };
    assert!(board.update(&id, input).await);
    assert_eq!(board.archived()[0].text, "renamed");
    assert!(board.todos().is_empty());

    assert!(board.toggle(&id).await);
    assert!(board.archived()[0].completed);

    let local = board.archived().to_vec();
    assert!(board.refresh_archived().await);
    assert_eq!(board.archived(), local.as_slice());
}

#[tokio::test]
async fn test_set_sort_reports_fetch_result() {
    let mut board = setup_board().await;
    board.add(TodoCreateInput::new("one")).await;

    assert!(board.set_sort(SortOrder::Newest).await);
    assert!(board.set_sort(SortOrder::Priority).await);
    assert_eq!(board.todos().len(), 1);

    let mut offline = TodoBoard::new(ApiClient::new("http://127.0.0.1:9"));
    assert!(!offline.set_sort(SortOrder::Oldest).await);
    assert_eq!(offline.sort(), SortOrder::Oldest);
}

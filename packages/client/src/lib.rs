// ABOUTME: Client library for the TodoLux REST API
// ABOUTME: HTTP client, board state that echoes server responses, and list view helpers

pub mod board;
pub mod client;
pub mod error;
pub mod view;

pub use board::TodoBoard;
pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use view::{apply_view, matches_query, SortOrder, StatusFilter};

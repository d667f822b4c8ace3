// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names and defaults used across TodoLux

// Server Configuration
pub const PORT: &str = "PORT";
pub const DEFAULT_PORT: u16 = 5000;

// Datastore Configuration
pub const DB_URL: &str = "DB_URL";
pub const DEFAULT_DB_URL: &str = "sqlite://todolist.db?mode=rwc";

// CORS Configuration (unset means any origin)
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// Client Configuration
pub const TODOLUX_API_URL: &str = "TODOLUX_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Port, datastore URL and optional CORS origin with validation

use std::env;
use std::num::ParseIntError;

use thiserror::Error;

use todolux_config::constants::{CORS_ORIGIN, DB_URL, DEFAULT_DB_URL, DEFAULT_PORT, PORT};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Database URL must not be empty")]
    EmptyDatabaseUrl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// `None` allows any origin.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var(PORT) {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = env::var(DB_URL).unwrap_or_else(|_| DEFAULT_DB_URL.to_string());
        if database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }

        let cors_origin = env::var(CORS_ORIGIN)
            .ok()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty());

        Ok(Config {
            port,
            database_url,
            cors_origin,
        })
    }

    /// Replace the port, e.g. from a `--port` flag
    pub fn with_port(mut self, port: u16) -> Result<Self, ConfigError> {
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }
        self.port = port;
        Ok(self)
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port = raw.trim().parse::<u16>()?;

    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }

    Ok(port)
}

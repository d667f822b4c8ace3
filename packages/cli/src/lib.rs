// ABOUTME: Server bootstrap for the todolux binary
// ABOUTME: Tracing setup, CORS/trace middleware and the graceful-shutdown serve loop

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use todolux_config::constants::{DEFAULT_LOG_FILTER, RUST_LOG};
use todolux_storage::DbState;

pub mod config;
pub mod error;

pub use config::{Config, ConfigError};
pub use error::ServerError;

/// Filter from `RUST_LOG`, falling back to the default level
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(RUST_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global tracing subscriber, writing to stderr
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Build the CORS layer: a single origin when configured, otherwise any origin.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, ServerError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match origin {
        Some(origin) => {
            let value = origin
                .parse::<HeaderValue>()
                .map_err(|_| ServerError::InvalidCorsOrigin(origin.to_string()))?;
            Ok(cors.allow_origin(value))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}

/// Full application: API routes plus CORS and request tracing
pub fn build_app(db: DbState, cors_origin: Option<&str>) -> Result<Router, ServerError> {
    let app = todolux_api::create_router(db)
        .layer(cors_layer(cors_origin)?)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// Connect the datastore and serve until Ctrl-C or SIGTERM
pub async fn run_server(config: Config) -> Result<(), ServerError> {
    info!("Connecting to datastore");
    let db = DbState::init(&config.database_url).await?;

    let pool = db.pool.clone();
    let app = build_app(db, config.cors_origin.as_deref())?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

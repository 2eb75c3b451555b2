//! Lecturer Claims - API Server Binary
//!
//! This binary starts the HTTP API server for lecturer claim submission and
//! review.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration (in-memory store)
//! cargo run --bin claims-api
//!
//! # Run against PostgreSQL
//! API_STORE_BACKEND=postgres API_DATABASE_URL=postgres://... cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_STORE_BACKEND` - `memory` or `postgres` (default: memory)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_DB_MAX_CONNECTIONS` - Pool size limit (default: 10)
//! * `API_DB_MIN_CONNECTIONS` - Idle connections kept open (default: 1)
//! * `API_DB_ACQUIRE_TIMEOUT_SECS` - Wait for a pooled connection (default: 30)
//! * `API_MAX_DOCUMENT_BYTES` - Largest accepted document (default: 5242880)
//! * `API_ALLOWED_EXTENSIONS` - Comma-separated extensions (default: .pdf,.docx,.xlsx)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use domain_claims::{ClaimStore, ClaimWorkflowService, InMemoryClaimStore};
use infra_db::{create_pool, run_migrations, PgClaimStore};
use interface_api::{
    config::{ApiConfig, StoreBackend},
    create_router,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, connects the claim store,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - The document policy in the configuration is invalid
/// - Database connection or migration fails
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = ?config.store_backend,
        "Starting Lecturer Claims API Server"
    );

    let policy = config
        .document_policy()
        .context("invalid document policy configuration")?;
    let store = create_store(&config).await?;
    let service = ClaimWorkflowService::with_policy(store, policy);

    let app = create_router(service, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to defaults when the environment cannot be read.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        ApiConfig::default()
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Builds the claim store selected by the configuration.
///
/// The postgres backend applies pending migrations before use.
async fn create_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn ClaimStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory claim store; claims are lost on restart");
            Ok(Arc::new(InMemoryClaimStore::new()))
        }
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(config.database_config())
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("failed to apply migrations")?;
            Ok(Arc::new(PgClaimStore::new(pool)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

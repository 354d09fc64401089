//! # Laundry API Server
//!
//! Binary entry point: configuration, logging, database, HTTP server.
//!
//! ## Startup
//! ```text
//!   .env ──► ApiConfig::load ──► Database::new (+ migrations)
//!                                      │
//!                                      ▼
//!                       axum::serve on 0.0.0.0:8080
//!                                      │
//!                        Ctrl-C / SIGTERM ──► graceful shutdown
//! ```

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use laundry_api::{router, ApiConfig, AppState};
use laundry_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("Starting laundry API server...");

    let config = ApiConfig::load()?;
    info!(
        driver = %config.db_connection,
        host = %config.db_host,
        database = %config.db_database,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config()?).await?;
    info!("Database ready");

    let app = router(AppState::new(db.clone()));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(%e, "Failed to install Ctrl+C handler");
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
                error!(%e, "Failed to install signal handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}

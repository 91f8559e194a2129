//! Bookwell API - Main entry point
//!
//! REST backend for community session booking with conflict-safe scheduling.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use bookwell_api::api::{create_router, AppContext};
use bookwell_api::store::Store;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for bookwell-api
#[derive(Parser, Debug)]
#[command(name = "bookwell-api")]
#[command(about = "Session booking backend for Bookwell")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "4040", env = "BOOKWELL_PORT")]
    port: u16,

    /// Path to the SQLite database file
    #[arg(short, long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookwell_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let db_path =
        bookwell_common::config::resolve_database_path(args.database.as_deref(), "BOOKWELL_DATABASE")
            .context("Failed to resolve database path")?;
    info!("Database: {}", db_path.display());

    let pool = bookwell_common::db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let ctx = AppContext::new(Store::new(pool));
    let app = create_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

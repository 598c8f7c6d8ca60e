//! HTTP server initialization and runtime setup.
//!
//! Handles store loading, worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::persistence::JsonStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Opens the configured store: file-backed when `DATA_FILE` is set.
///
/// # Errors
///
/// Returns an error if the data file exists but cannot be loaded.
pub async fn open_store(config: &Config) -> Result<JsonStore> {
    let store = match &config.data_file {
        Some(path) => JsonStore::open(path, config.default_settings()).await?,
        None => {
            tracing::warn!("DATA_FILE not set, links will not survive a restart");
            JsonStore::in_memory(config.default_settings())
        }
    };
    Ok(store)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - JSON store (file-backed or in-memory)
/// - Background click worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The data file is corrupt or unreadable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = Arc::new(open_store(&config).await?);

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let state = AppState::new(
        store,
        click_tx,
        &config.public_scheme,
        config.default_settings(),
    );

    let worker = tokio::spawn(run_click_worker(
        click_rx,
        state.stats_service.clone(),
        config.click_retry_attempts,
    ));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and with it every click sender) is dropped once serve
    // returns, so the worker drains the queue and exits.
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Click worker panicked");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

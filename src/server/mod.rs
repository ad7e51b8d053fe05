// src/server/mod.rs
// =============================================================================
// This module runs the HTTP service.
//
// Flow:
// 1. Bind a TCP listener on the configured host and port
// 2. Serve the router from routes.rs on it
// 3. Stop accepting connections on Ctrl-C and let in-flight requests finish
//
// Requests share nothing except the HTTP client's connection pool.
// =============================================================================

mod routes;

pub use routes::router;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::github::GistClient;

/// Serves the search API until Ctrl-C is pressed
pub async fn serve<C>(host: &str, port: u16, client: C) -> Result<()>
where
    C: GistClient + 'static,
{
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))?;

    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(client))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, keep serving forever
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

//! Graceful shutdown: flag the drain on the health probes, then stop the
//! listener once in-flight requests complete.

use actix_web::dev::ServerHandle;
use actix_web::web;
use tokio::signal;
use tracing::{error, info};

use users_api::inbound::http::health::HealthState;

/// Wait for Ctrl+C or, on Unix, SIGTERM.
///
/// # Errors
/// Returns an error when a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> std::io::Result<()> {
    tokio::select! {
        result = wait_ctrl_c() => result,
        result = wait_sigterm() => result,
    }
}

async fn wait_ctrl_c() -> std::io::Result<()> {
    signal::ctrl_c().await.inspect_err(|e| {
        error!(%e, "error handling Ctrl+C signal");
    })?;
    info!("received Ctrl+C signal");
    Ok(())
}

#[cfg(unix)]
async fn wait_sigterm() -> std::io::Result<()> {
    let mut handler =
        signal::unix::signal(signal::unix::SignalKind::terminate()).inspect_err(|e| {
            error!(%e, "failed to install SIGTERM handler");
        })?;
    handler.recv().await;
    info!("received SIGTERM signal");
    Ok(())
}

#[cfg(not(unix))]
async fn wait_sigterm() -> std::io::Result<()> {
    std::future::pending().await
}

/// Report the process as draining and stop the server gracefully.
///
/// Liveness turns 503 before the listener stops so orchestrators route
/// traffic elsewhere.
pub async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining connections");
    handle.stop(true).await;
}

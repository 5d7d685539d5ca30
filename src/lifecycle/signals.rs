//! OS signal handling.

use std::sync::Arc;

use crate::lifecycle::Shutdown;

/// Wait for SIGINT or SIGTERM, then trigger the shutdown coordinator.
pub async fn listen(shutdown: Arc<Shutdown>) {
    tokio::select! {
        _ = ctrl_c() => {}
        _ = terminate() => {}
    }
    tracing::info!("Shutdown signal received");
    shutdown.trigger();
}

async fn ctrl_c() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    signal(SignalKind::terminate())
        .expect("Failed to install SIGTERM handler")
        .recv()
        .await;
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

//! Shutdown coordination for the host.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::client::Client;

/// Dispose `client` when Ctrl+C is received.
///
/// Returns the watcher task so the host can abort it after its work is done.
pub fn dispose_on_ctrl_c(client: Arc<Client>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                client.dispose();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
        }
    })
}

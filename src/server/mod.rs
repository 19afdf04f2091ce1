//! Form server
//!
//! Serves the date-range form and streams the generated workbook back as a
//! download. Failures redirect to the form with a flash message.

pub mod page;
pub mod routes;

pub use page::{render_form, Flash};
pub use routes::{router, AppState, ReportForm};

use crate::config::ServerConfig;
use crate::core::report::ReportCoordinator;
use crate::domain::{ReportError, Result};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Binds the listener and serves until `shutdown` flips to `true`
///
/// In-flight requests get `shutdown_timeout_secs` to finish after the
/// signal; the server returns regardless once that elapses.
pub async fn run(
    server: &ServerConfig,
    coordinator: Arc<ReportCoordinator>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let addr = server.socket_addr().map_err(ReportError::Configuration)?;
    let app = router(AppState { coordinator });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ReportError::Io(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "Report server listening");

    let mut graceful = shutdown.clone();
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown(&mut graceful).await;
            tracing::info!("Shutdown signal received, draining connections");
        })
        .into_future();

    let mut forced = shutdown;
    let drain_timeout = Duration::from_secs(server.shutdown_timeout_secs);

    tokio::select! {
        result = serve => {
            result.map_err(|e| ReportError::Io(format!("Server error: {e}")))?;
        }
        _ = async {
            wait_for_shutdown(&mut forced).await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            tracing::warn!(
                timeout_secs = server.shutdown_timeout_secs,
                "Connections still open after shutdown timeout, stopping anyway"
            );
        }
    }

    tracing::info!("Report server stopped");
    Ok(())
}

/// Resolves once the shutdown flag is `true`
///
/// Never resolves if the sender is dropped without setting the flag.
pub async fn wait_for_shutdown(signal: &mut watch::Receiver<bool>) {
    while !*signal.borrow_and_update() {
        if signal.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

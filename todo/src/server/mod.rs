//! HTTP server for the todo list.
//!
//! - Application state holding one store per browser tab
//! - Page, API, and health endpoints
//! - Correlation-id and request tracing middleware
//! - Graceful shutdown signal handling

pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use session::{SessionId, Sessions, SESSION_ID_HEADER};
pub use state::AppState;

use tokio::signal;

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
///
/// If a handler cannot be installed the error is logged and that signal is
/// ignored.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}

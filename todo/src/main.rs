//! Todo list HTTP server.

use anyhow::Context;
use std::sync::Arc;
use todo_list::{
    config::{Config, DEFAULT_LOG_FILTER},
    server::{build_router, shutdown_signal, AppState, Sessions},
    TodoEnvironment,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.server.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        host = %config.server.host,
        port = config.server.port,
        shutdown_timeout = config.server.shutdown_timeout,
        max_sessions = config.sessions.max_sessions,
        "Configuration loaded"
    );

    let sessions = Arc::new(Sessions::new(
        TodoEnvironment::production(),
        config.sessions.max_sessions,
    ));
    let app = build_router(AppState::new(Arc::clone(&sessions)));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Err(error) = sessions.shutdown(config.server.shutdown_timeout()).await {
        warn!(%error, "Sessions did not drain before the shutdown timeout");
    }

    info!("Server stopped");
    Ok(())
}

//! Application state for the HTTP server.

use super::session::{Sessions, DEFAULT_MAX_SESSIONS};
use crate::TodoEnvironment;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply, via `Arc`) for each request.
#[derive(Clone)]
pub struct AppState {
    /// One todo list per browser tab
    pub sessions: Arc<Sessions>,
}

impl AppState {
    /// Create a new application state around an existing session registry.
    #[must_use]
    pub const fn new(sessions: Arc<Sessions>) -> Self {
        Self { sessions }
    }

    /// No sessions yet; wall-clock time and random ids
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_environment(TodoEnvironment::production())
    }

    /// No sessions yet; every new list uses `env`
    #[must_use]
    pub fn with_environment(env: TodoEnvironment) -> Self {
        Self::new(Arc::new(Sessions::new(env, DEFAULT_MAX_SESSIONS)))
    }
}

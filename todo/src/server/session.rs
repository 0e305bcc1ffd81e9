//! Per-tab sessions.
//!
//! Every browser tab owns a separate todo list, including its draft text.
//! The page generates a session id once per tab and sends it with every API
//! request in the `X-Session-ID` header; [`Sessions`] maps that id to the
//! tab's store, creating it on first use.

use super::error::ApiError;
use crate::{TodoEnvironment, TodoReducer, TodoState, TodoStore};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tasklist_runtime::{HealthCheck, StoreError};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Header carrying the tab's session id
pub const SESSION_ID_HEADER: &str = "X-Session-ID";

/// Sessions kept before the least recently used one is dropped
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Identifies one browser tab's todo list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(SESSION_ID_HEADER).ok_or_else(|| {
            ApiError::bad_request(format!("missing {SESSION_ID_HEADER} header"))
        })?;

        value
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(Self)
            .ok_or_else(|| ApiError::bad_request(format!("invalid {SESSION_ID_HEADER} header")))
    }
}

struct Session {
    store: Arc<TodoStore>,
    last_seen: u64,
}

#[derive(Default)]
struct Registry {
    sessions: HashMap<SessionId, Session>,
    clock: u64,
}

impl Registry {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_least_recent(&mut self) -> Option<SessionId> {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|(_, session)| session.last_seen)
            .map(|(id, _)| *id)?;
        self.sessions.remove(&oldest);
        Some(oldest)
    }
}

/// All live sessions, each with its own store
pub struct Sessions {
    env: TodoEnvironment,
    capacity: usize,
    registry: RwLock<Registry>,
    shutting_down: AtomicBool,
}

impl Sessions {
    /// Create an empty registry holding at most `capacity` sessions
    ///
    /// New stores share `env`. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(env: TodoEnvironment, capacity: usize) -> Self {
        Self {
            env,
            capacity: capacity.max(1),
            registry: RwLock::new(Registry::default()),
            shutting_down: AtomicBool::new(false),
        }
    }

    /// The store for `id`, created empty on first use
    ///
    /// When the registry is full the least recently used session is dropped
    /// to make room.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once [`shutdown`](Self::shutdown)
    /// has been called.
    pub async fn store_for(&self, id: SessionId) -> Result<Arc<TodoStore>, StoreError> {
        if self.is_shutting_down() {
            return Err(StoreError::ShutdownInProgress);
        }

        let mut registry = self.registry.write().await;
        let now = registry.tick();

        if let Some(session) = registry.sessions.get_mut(&id) {
            session.last_seen = now;
            return Ok(Arc::clone(&session.store));
        }

        if registry.sessions.len() >= self.capacity {
            if let Some(evicted) = registry.evict_least_recent() {
                tracing::info!(session = %evicted, "Evicted least recently used session");
                metrics::counter!("todo.sessions.evicted").increment(1);
            }
        }

        let store = Arc::new(TodoStore::new(
            TodoState::new(),
            TodoReducer::new(),
            self.env.clone(),
        ));
        registry.sessions.insert(
            id,
            Session {
                store: Arc::clone(&store),
                last_seen: now,
            },
        );

        tracing::debug!(session = %id, "Session started");
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("todo.sessions.active").set(registry.sessions.len() as f64);

        Ok(store)
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.registry.read().await.sessions.len()
    }

    /// Whether no session has been started
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Whether `shutdown` has been called
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    /// Report whether new commands are accepted
    pub async fn health(&self) -> HealthCheck {
        let check = if self.is_shutting_down() {
            HealthCheck::unhealthy("sessions", "Server is shutting down")
        } else {
            HealthCheck::healthy("sessions")
        };

        check.with_metadata("active", self.len().await.to_string())
    }

    /// Refuse new sessions and shut every store down
    ///
    /// All stores share one deadline of `timeout` from the call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if any store was still
    /// reducing an action when the deadline passed. Every store is told to
    /// shut down regardless.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.shutting_down.store(true, Ordering::Release);

        let stores: Vec<_> = self
            .registry
            .read()
            .await
            .sessions
            .values()
            .map(|session| Arc::clone(&session.store))
            .collect();
        tracing::info!(sessions = stores.len(), "Shutting down sessions");

        let deadline = Instant::now() + timeout;
        let mut failed = None;
        for store in stores {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if store.shutdown(remaining).await.is_err() {
                failed = Some(StoreError::ShutdownTimeout(timeout));
            }
        }

        failed.map_or(Ok(()), Err)
    }
}

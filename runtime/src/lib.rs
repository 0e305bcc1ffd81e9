//! # Tasklist Runtime
//!
//! The `Store` runtime that owns application state and runs the reducer for
//! every action, one action at a time.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// An in-flight action was still being reduced when the shutdown
        /// deadline elapsed
        #[error("Timed out after {0:?} waiting for in-flight actions")]
        ShutdownTimeout(std::time::Duration),
    }
}

pub use error::StoreError;

/// Health check status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    /// Accepting actions
    Healthy,
    /// Not accepting actions
    Unhealthy,
}

impl HealthStatus {
    /// Returns `true` if the component can serve traffic
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Result of a single component health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    /// Component name
    pub component: String,
    /// Current status
    pub status: HealthStatus,
    /// Optional explanation for a non-healthy status
    pub message: Option<String>,
    /// Extra diagnostic values
    pub metadata: BTreeMap<String, String>,
}

impl HealthCheck {
    /// Create a healthy check result
    #[must_use]
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            message: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Create an unhealthy check result
    #[must_use]
    pub fn unhealthy(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a diagnostic key/value pair
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Store implementation
pub mod store {
    use super::{Arc, StoreError};
    use std::marker::PhantomData;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};
    use tasklist_core::reducer::Reducer;
    use tokio::sync::RwLock;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer runs under the write lock)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    ///
    /// Cloning a Store is cheap and yields a handle to the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        _action: PhantomData<fn() -> A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                _action: PhantomData,
            }
        }

        /// Send an action to the store
        ///
        /// Acquires the write lock, runs the reducer, and releases the lock.
        /// Returns once the state transition is done.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            self.send_with(action, |_| ()).await
        }

        /// Send an action and inspect the resulting state before any other
        /// action can run.
        ///
        /// Useful for request/response callers that need to know what their
        /// own action did (for example, whether it was rejected).
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        pub async fn send_with<F, T>(&self, action: A, inspect: F) -> Result<T, StoreError>
        where
            F: FnOnce(&S) -> T,
        {
            if self.is_shutting_down() {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let mut state = self.state.write().await;

            let start = Instant::now();
            self.reducer.reduce(&mut *state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());
            tracing::trace!("Reducer completed");

            Ok(inspect(&*state))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let open = store.state(|s| s.active_count()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Whether `shutdown` has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Stop accepting actions and wait for the in-flight ones
        ///
        /// Actions already queued on the state lock are still reduced; the
        /// store is drained once the write lock can be taken.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if an action is still being
        /// reduced when `timeout` elapses.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            if tokio::time::timeout(timeout, self.state.write()).await.is_ok() {
                tracing::info!("In-flight actions drained, shutdown successful");
                metrics::counter!("store.shutdown.completed").increment(1);
                Ok(())
            } else {
                let error = StoreError::ShutdownTimeout(timeout);
                tracing::error!(%error, "Shutdown timed out");
                metrics::counter!("store.shutdown.timeout").increment(1);
                Err(error)
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                _action: PhantomData,
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tasklist_core::reducer::Reducer;

    #[derive(Debug, Clone, Default)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone)]
    enum TestAction {
        Increment,
        Decrement,
        SlowIncrement(Duration),
    }

    #[derive(Debug, Clone)]
    struct TestEnv;

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) {
            match action {
                TestAction::Increment => state.value += 1,
                TestAction::Decrement => state.value -= 1,
                TestAction::SlowIncrement(delay) => {
                    std::thread::sleep(delay);
                    state.value += 1;
                },
            }
        }
    }

    fn test_store() -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState::default(), TestReducer, TestEnv)
    }

    #[tokio::test]
    async fn send_runs_reducer() {
        let store = test_store();

        assert_eq!(store.send(TestAction::Increment).await, Ok(()));
        assert_eq!(store.send(TestAction::Increment).await, Ok(()));
        assert_eq!(store.send(TestAction::Decrement).await, Ok(()));

        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn send_with_observes_own_transition() {
        let store = test_store();

        let value = store
            .send_with(TestAction::Increment, |s| s.value)
            .await;

        assert_eq!(value, Ok(1));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = test_store();
        let other = store.clone();

        other.send(TestAction::Increment).await.unwrap();

        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions() {
        let store = test_store();

        assert_eq!(store.shutdown(Duration::from_secs(1)).await, Ok(()));
        assert!(store.is_shutting_down());
        assert_eq!(
            store.send(TestAction::Increment).await,
            Err(StoreError::ShutdownInProgress)
        );
        assert_eq!(store.state(|s| s.value).await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn shutdown_waits_for_in_flight_action() {
        let store = test_store();
        let sender = store.clone();
        let in_flight = tokio::spawn(async move {
            sender
                .send(TestAction::SlowIncrement(Duration::from_millis(50)))
                .await
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(store.shutdown(Duration::from_secs(1)).await, Ok(()));

        assert_eq!(in_flight.await.unwrap(), Ok(()));
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn shutdown_times_out_behind_a_stuck_action() {
        let store = test_store();
        let sender = store.clone();
        let in_flight = tokio::spawn(async move {
            sender
                .send(TestAction::SlowIncrement(Duration::from_millis(200)))
                .await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        let timeout = Duration::from_millis(10);
        assert_eq!(
            store.shutdown(timeout).await,
            Err(StoreError::ShutdownTimeout(timeout))
        );

        in_flight.await.unwrap().unwrap();
    }

    #[test]
    fn health_checks_carry_status_and_metadata() {
        let check = HealthCheck::healthy("sessions").with_metadata("active", "3");
        assert!(check.status.is_healthy());
        assert_eq!(check.message, None);
        assert_eq!(check.metadata.get("active").map(String::as_str), Some("3"));

        let check = HealthCheck::unhealthy("sessions", "Server is shutting down");
        assert_eq!(check.status, HealthStatus::Unhealthy);
        assert!(!check.status.is_healthy());
        assert_eq!(check.message.as_deref(), Some("Server is shutting down"));
    }

    #[test]
    fn health_status_display() {
        assert_eq!(HealthStatus::Healthy.to_string(), "healthy");
        assert_eq!(HealthStatus::Unhealthy.to_string(), "unhealthy");
    }
}

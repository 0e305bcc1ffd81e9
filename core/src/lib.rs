//! # Tasklist Core
//!
//! Core traits and types for the todo-list application.
//!
//! The application is built as a functional core wrapped in an imperative
//! shell. Everything the user can do is an **action**; a **reducer** applies
//! an action to the **state**; external inputs such as the current time or
//! fresh identifiers come from an injected **environment**.
//!
//! ## Example
//!
//! ```
//! use tasklist_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Tally {
//!     total: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TallyAction {
//!     Bump,
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Tally, action: TallyAction, _env: &()) {
//!         match action {
//!             TallyAction::Bump => state.total += 1,
//!         }
//!     }
//! }
//!
//! let mut state = Tally::default();
//! TallyReducer.reduce(&mut state, TallyAction::Bump, &());
//! assert_eq!(state.total, 1);
//! ```

pub use chrono::{DateTime, Utc};

/// The reducer trait: all business logic lives behind it.
pub mod reducer {
    /// Pure transition function `(State, Action, Environment) -> State`.
    ///
    /// Implementations validate the action and update `state` in place. They
    /// must not perform I/O themselves; anything from the outside world comes
    /// through the environment.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Injected dependencies
        type Environment;

        /// Apply an action to the state.
        fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment);
    }
}

/// Dependency injection traits.
///
/// Anything a reducer would otherwise read from the outside world goes
/// through one of these traits, so tests can substitute deterministic
/// implementations.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Source of the current time.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of fresh identifiers.
    pub trait IdGenerator: Send + Sync {
        /// Produce an identifier that has not been handed out before
        fn next_id(&self) -> Uuid;
    }

    /// Random v4 UUIDs.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RandomIdGenerator;

    impl IdGenerator for RandomIdGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::environment::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
    use super::reducer::Reducer;

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn random_ids_are_distinct() {
        let ids = RandomIdGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    struct Stamp;

    impl Reducer for Stamp {
        type State = Vec<String>;
        type Action = ();
        type Environment = SystemClock;

        fn reduce(&self, state: &mut Vec<String>, (): (), env: &SystemClock) {
            state.push(env.now().to_rfc3339());
        }
    }

    #[test]
    fn reducer_reads_time_from_environment() {
        let mut state = Vec::new();
        Stamp.reduce(&mut state, (), &SystemClock);
        Stamp.reduce(&mut state, (), &SystemClock);
        assert_eq!(state.len(), 2);
        assert!(state[0] <= state[1]);
    }
}

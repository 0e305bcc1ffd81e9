//! Reducer logic for the todo list.
//!
//! Each action maps onto one `TodoState` transition. Rejected actions leave
//! the list alone and are reported through `last_error`.

use crate::actions::{TodoAction, TodoRef};
use crate::error::TodoError;
use crate::state::TodoState;
use crate::types::TodoId;
use std::sync::Arc;
use tasklist_core::{
    environment::{Clock, IdGenerator, RandomIdGenerator, SystemClock},
    reducer::Reducer,
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation and completion timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of new todo ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Wall-clock time and random v4 ids
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator))
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn apply(
        state: &mut TodoState,
        action: TodoAction,
        env: &TodoEnvironment,
    ) -> Result<(), TodoError> {
        match action {
            TodoAction::SetDraftText { text } => {
                state.set_draft_text(text);
            },

            TodoAction::AddTodo => {
                let id = TodoId::from_uuid(env.ids.next_id());
                match state.add_todo(id, env.clock.now())? {
                    Some(id) => tracing::debug!(%id, "Todo added"),
                    None => tracing::debug!("Ignored add with empty draft"),
                }
            },

            TodoAction::ToggleCompleted { target } => {
                let now = env.clock.now();
                let completed = match target {
                    TodoRef::Id(id) => state.toggle_completed(id, now)?,
                    TodoRef::Index(index) => state.toggle_completed_at(index, now)?,
                };
                tracing::debug!(todo = ?target, completed, "Todo toggled");
            },

            TodoAction::RemoveTodo { target } => {
                let removed = match target {
                    TodoRef::Id(id) => state.remove(id)?,
                    TodoRef::Index(index) => state.remove_at(index)?,
                };
                tracing::debug!(id = %removed.id(), "Todo removed");
            },

            TodoAction::ClearCompleted => {
                let removed = state.clear_completed();
                tracing::debug!(removed = removed.len(), "Cleared completed todos");
            },

            TodoAction::SetFilter { value } => {
                let filter = state.set_filter(&value)?;
                tracing::debug!(%filter, "Filter changed");
            },
        }

        Ok(())
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        let name = action.name();

        match Self::apply(state, action, env) {
            Ok(()) => state.set_last_error(None),
            Err(error) => {
                tracing::warn!(action = name, code = error.code(), %error, "Rejected todo action");
                metrics::counter!("todo.actions.rejected", "action" => name).increment(1);
                state.set_last_error(Some(error));
            },
        }
    }
}

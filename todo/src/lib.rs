//! # Todo List
//!
//! A single-page todo list: add tasks, toggle them complete, filter the
//! visible list, and clear completed items. All state is kept in memory,
//! one list per browser tab.
//!
//! The list itself is [`TodoState`]. Every user intent is a [`TodoAction`]
//! applied by [`TodoReducer`] inside a [`Store`](tasklist_runtime::Store);
//! the page reads back a [`TodoView`].
//!
//! ## Example
//!
//! ```
//! use todo_list::{TodoAction, TodoEnvironment, TodoReducer, TodoState, TodoRef};
//! use tasklist_core::reducer::Reducer;
//!
//! let reducer = TodoReducer::new();
//! let env = TodoEnvironment::production();
//! let mut state = TodoState::new();
//!
//! reducer.reduce(&mut state, TodoAction::SetDraftText { text: "Buy milk".into() }, &env);
//! reducer.reduce(&mut state, TodoAction::AddTodo, &env);
//! reducer.reduce(&mut state, TodoAction::ToggleCompleted { target: TodoRef::Index(0) }, &env);
//!
//! assert_eq!(state.completed_count(), 1);
//! assert_eq!(state.draft_text(), "");
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod filter;
pub mod reducer;
pub mod server;
pub mod state;
pub mod types;
pub mod view;

pub use actions::{TodoAction, TodoCommand, TodoRef};
pub use error::TodoError;
pub use filter::Filter;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use state::TodoState;
pub use types::{TodoId, TodoItem};
pub use view::TodoView;

/// The store type serving one todo list
pub type TodoStore = tasklist_runtime::Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

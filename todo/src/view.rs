//! Read-only projection of the state for the page.

use crate::filter::Filter;
use crate::state::TodoState;
use crate::types::{TodoId, TodoItem};
use serde::Serialize;

/// What the page needs to draw itself
///
/// Built fresh from the state on every read; nothing here is cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoView {
    /// Current draft text
    pub draft_text: String,
    /// Active filter
    pub filter: Filter,
    /// Every filter, in selector order
    pub filters: Vec<FilterOption>,
    /// Items matching the active filter, in storage order
    pub visible: Vec<VisibleTodo>,
    /// Items not yet completed
    pub active_count: usize,
    /// Completed items
    pub completed_count: usize,
    /// All items regardless of filter
    pub total: usize,
    /// Message of the most recent rejected command
    pub last_error: Option<String>,
}

/// One entry in the filter selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Wire value
    pub value: Filter,
    /// Display label
    pub label: &'static str,
}

/// One row of the visible list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VisibleTodo {
    /// Stable id; use this to address the item
    pub id: TodoId,
    /// Position in the unfiltered list
    pub index: usize,
    /// Item text
    pub text: String,
    /// Completion flag
    pub completed: bool,
}

impl VisibleTodo {
    fn new(index: usize, item: &TodoItem) -> Self {
        Self {
            id: item.id(),
            index,
            text: item.text().to_string(),
            completed: item.completed(),
        }
    }
}

impl From<&TodoState> for TodoView {
    fn from(state: &TodoState) -> Self {
        Self {
            draft_text: state.draft_text().to_string(),
            filter: state.filter(),
            filters: Filter::OPTIONS
                .into_iter()
                .map(|value| FilterOption {
                    value,
                    label: value.label(),
                })
                .collect(),
            visible: state
                .visible()
                .map(|(index, item)| VisibleTodo::new(index, item))
                .collect(),
            active_count: state.active_count(),
            completed_count: state.completed_count(),
            total: state.len(),
            last_error: state.last_error().map(ToString::to_string),
        }
    }
}

//! The todo-list model and its transitions.
//!
//! `TodoState` is the whole application state. Its methods are the only way
//! to change it, and each one either applies completely or returns a
//! [`TodoError`] and leaves the state as it was.

use crate::error::TodoError;
use crate::filter::Filter;
use crate::types::{TodoId, TodoItem};
use chrono::{DateTime, Utc};

/// Whole-application state
///
/// Invariants:
/// - no item has empty text
/// - item ids are unique
/// - positions used by `*_at` methods index the unfiltered `items`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    items: Vec<TodoItem>,
    draft_text: String,
    filter: Filter,
    last_error: Option<TodoError>,
}

impl TodoState {
    /// Creates an empty list with the `all` filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in storage order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Text typed for the next todo
    #[must_use]
    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    /// The active view selector
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Storage position of an item
    #[must_use]
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Most recent rejected operation, cleared by the next successful one
    #[must_use]
    pub const fn last_error(&self) -> Option<&TodoError> {
        self.last_error.as_ref()
    }

    pub(crate) fn set_last_error(&mut self, error: Option<TodoError>) {
        self.last_error = error;
    }

    /// Number of items not yet completed
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed()).count()
    }

    /// Number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed()).count()
    }

    /// Replaces the draft text unconditionally
    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    /// Turns the draft into a new active item at the end of the list
    ///
    /// The draft is used exactly as typed (no trimming). An empty draft is a
    /// silent no-op and returns `Ok(None)`; otherwise the draft is cleared and
    /// the new id returned.
    ///
    /// # Errors
    ///
    /// [`TodoError::DuplicateId`] if an item with `id` is already in the
    /// list. The draft is kept.
    pub fn add_todo(
        &mut self,
        id: TodoId,
        created_at: DateTime<Utc>,
    ) -> Result<Option<TodoId>, TodoError> {
        let Some(item) = TodoItem::new(id, self.draft_text.as_str(), created_at) else {
            return Ok(None);
        };
        if self.position(id).is_some() {
            return Err(TodoError::DuplicateId { id });
        }

        self.items.push(item);
        self.draft_text.clear();
        Ok(Some(id))
    }

    /// Flips completion of the item at `index` and returns the new value
    ///
    /// # Errors
    ///
    /// [`TodoError::OutOfRange`] if `index` is not a valid position.
    pub fn toggle_completed_at(
        &mut self,
        index: usize,
        at: DateTime<Utc>,
    ) -> Result<bool, TodoError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .map(|item| item.toggle(at))
            .ok_or(TodoError::OutOfRange { index, len })
    }

    /// Flips completion of the item with `id` and returns the new value
    ///
    /// # Errors
    ///
    /// [`TodoError::UnknownTodo`] if no item has that id.
    pub fn toggle_completed(&mut self, id: TodoId, at: DateTime<Utc>) -> Result<bool, TodoError> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .map(|item| item.toggle(at))
            .ok_or(TodoError::UnknownTodo { id })
    }

    /// Removes the item at `index`, shifting later items left
    ///
    /// # Errors
    ///
    /// [`TodoError::OutOfRange`] if `index` is not a valid position.
    pub fn remove_at(&mut self, index: usize) -> Result<TodoItem, TodoError> {
        if index >= self.items.len() {
            return Err(TodoError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }

        Ok(self.items.remove(index))
    }

    /// Removes the item with `id`
    ///
    /// # Errors
    ///
    /// [`TodoError::UnknownTodo`] if no item has that id.
    pub fn remove(&mut self, id: TodoId) -> Result<TodoItem, TodoError> {
        let index = self.position(id).ok_or(TodoError::UnknownTodo { id })?;
        Ok(self.items.remove(index))
    }

    /// Drops every completed item, keeping the rest in order
    ///
    /// Returns the ids that were removed.
    pub fn clear_completed(&mut self) -> Vec<TodoId> {
        let (completed, active): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(TodoItem::completed);
        self.items = active;
        completed.iter().map(TodoItem::id).collect()
    }

    /// Selects the view by wire value
    ///
    /// # Errors
    ///
    /// [`TodoError::InvalidFilter`] unless `value` is `all`, `active`, or
    /// `completed`.
    pub fn set_filter(&mut self, value: &str) -> Result<Filter, TodoError> {
        let filter = value.parse()?;
        self.filter = filter;
        Ok(filter)
    }

    /// Items matching the active filter, in storage order
    ///
    /// Computed fresh on every call.
    #[must_use]
    pub fn visible_todos(&self) -> Vec<&TodoItem> {
        self.visible().map(|(_, item)| item).collect()
    }

    /// Like [`visible_todos`](Self::visible_todos), paired with each item's
    /// storage position
    pub fn visible(&self) -> impl Iterator<Item = (usize, &TodoItem)> + '_ {
        let filter = self.filter;
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| filter.matches(item))
    }
}

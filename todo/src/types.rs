//! Domain types for the todo list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a todo item
///
/// Ids survive filtering and removal of other items, so the renderer can
/// address an item without knowing where it sits in storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
///
/// The text is fixed at creation and is never empty; only the completion
/// flag changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoItem {
    id: TodoId,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates an active todo item, or `None` if `text` is empty
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>, created_at: DateTime<Utc>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            id,
            text,
            completed: false,
            created_at,
            completed_at: None,
        })
    }

    /// The item's id
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// The item's text, exactly as entered
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the todo is completed
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// When the todo was created
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the todo was last marked completed (cleared when reopened)
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Flips the completion flag and returns the new value
    pub fn toggle(&mut self, at: DateTime<Utc>) -> bool {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(at);
        self.completed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(n: u128) -> TodoId {
        TodoId::from_uuid(Uuid::from_u128(n))
    }

    #[test]
    fn todo_id_display_is_uuid() {
        let todo_id = id(1);
        assert_eq!(todo_id.to_string(), "00000000-0000-0000-0000-000000000001");
        assert_eq!(todo_id.as_uuid(), &Uuid::from_u128(1));
    }

    #[test]
    fn todo_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&id(2)).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000002\"");
    }

    #[test]
    fn new_item_is_active() {
        let now = Utc::now();
        let item = TodoItem::new(id(1), "Buy milk", now).unwrap();

        assert_eq!(item.id(), id(1));
        assert_eq!(item.text(), "Buy milk");
        assert!(!item.completed());
        assert_eq!(item.created_at(), now);
        assert_eq!(item.completed_at(), None);
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(TodoItem::new(id(1), "", Utc::now()).is_none());
    }

    #[test]
    fn whitespace_text_is_kept_verbatim() {
        let item = TodoItem::new(id(1), "  ", Utc::now()).unwrap();
        assert_eq!(item.text(), "  ");
    }

    #[test]
    fn toggle_tracks_completion_time() {
        let created = Utc::now();
        let mut item = TodoItem::new(id(1), "Test", created).unwrap();

        let done = created + chrono::Duration::minutes(5);
        assert!(item.toggle(done));
        assert_eq!(item.completed_at(), Some(done));

        assert!(!item.toggle(done));
        assert_eq!(item.completed_at(), None);
    }
}

//! Actions the reducer accepts and their JSON wire form.

use crate::types::TodoId;
use serde::Deserialize;

/// How an action names the item it applies to
///
/// On the wire this is an object with exactly one of `id` or `index`;
/// both, neither, or any other key is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TargetFields")]
pub enum TodoRef {
    /// Stable id, unaffected by filtering and by removal of other items
    Id(TodoId),
    /// Position in the unfiltered list
    Index(usize),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetFields {
    id: Option<TodoId>,
    index: Option<usize>,
}

impl TryFrom<TargetFields> for TodoRef {
    type Error = &'static str;

    fn try_from(fields: TargetFields) -> Result<Self, Self::Error> {
        match (fields.id, fields.index) {
            (Some(id), None) => Ok(Self::Id(id)),
            (None, Some(index)) => Ok(Self::Index(index)),
            (Some(_), Some(_)) => Err("expected one of `id` or `index`, found both"),
            (None, None) => Err("missing `id` or `index`"),
        }
    }
}

impl From<TodoId> for TodoRef {
    fn from(id: TodoId) -> Self {
        Self::Id(id)
    }
}

impl From<usize> for TodoRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Everything that can happen to the todo list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Replace the in-progress text
    SetDraftText {
        /// New draft
        text: String,
    },
    /// Create an item from the draft
    AddTodo,
    /// Flip an item between active and completed
    ToggleCompleted {
        /// Which item
        target: TodoRef,
    },
    /// Delete an item
    RemoveTodo {
        /// Which item
        target: TodoRef,
    },
    /// Delete every completed item
    ClearCompleted,
    /// Change the view selector
    SetFilter {
        /// Raw wire value, validated by the reducer
        value: String,
    },
}

impl TodoAction {
    /// Short name used in logs and metrics
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetDraftText { .. } => "set_draft_text",
            Self::AddTodo => "add_todo",
            Self::ToggleCompleted { .. } => "toggle_completed",
            Self::RemoveTodo { .. } => "remove_todo",
            Self::ClearCompleted => "clear_completed",
            Self::SetFilter { .. } => "set_filter",
        }
    }
}

/// A command as posted by the page
///
/// Item-targeting commands carry exactly one of `id` or `index` and no
/// other keys:
///
/// ```json
/// {"type": "set_draft_text", "text": "Buy milk"}
/// {"type": "add_todo"}
/// {"type": "toggle_completed", "id": "6f1c..."}
/// {"type": "remove_todo", "index": 0}
/// {"type": "set_filter", "value": "active"}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TodoCommand {
    /// See [`TodoAction::SetDraftText`]
    SetDraftText {
        /// New draft
        text: String,
    },
    /// See [`TodoAction::AddTodo`]
    AddTodo,
    /// See [`TodoAction::ToggleCompleted`]
    ToggleCompleted(TodoRef),
    /// See [`TodoAction::RemoveTodo`]
    RemoveTodo(TodoRef),
    /// See [`TodoAction::ClearCompleted`]
    ClearCompleted,
    /// See [`TodoAction::SetFilter`]
    SetFilter {
        /// Wire value of the filter
        value: String,
    },
}

impl From<TodoCommand> for TodoAction {
    fn from(command: TodoCommand) -> Self {
        match command {
            TodoCommand::SetDraftText { text } => Self::SetDraftText { text },
            TodoCommand::AddTodo => Self::AddTodo,
            TodoCommand::ToggleCompleted(target) => Self::ToggleCompleted { target },
            TodoCommand::RemoveTodo(target) => Self::RemoveTodo { target },
            TodoCommand::ClearCompleted => Self::ClearCompleted,
            TodoCommand::SetFilter { value } => Self::SetFilter { value },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn parse(value: serde_json::Value) -> TodoCommand {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_unit_commands() {
        assert_eq!(parse(json!({"type": "add_todo"})), TodoCommand::AddTodo);
        assert_eq!(
            parse(json!({"type": "clear_completed"})),
            TodoCommand::ClearCompleted
        );
    }

    #[test]
    fn parses_text_and_filter_commands() {
        assert_eq!(
            parse(json!({"type": "set_draft_text", "text": "Buy milk"})),
            TodoCommand::SetDraftText {
                text: "Buy milk".to_string()
            }
        );
        assert_eq!(
            parse(json!({"type": "set_filter", "value": "active"})),
            TodoCommand::SetFilter {
                value: "active".to_string()
            }
        );
    }

    #[test]
    fn parses_targets_by_id_or_index() {
        let id = TodoId::from_uuid(Uuid::from_u128(3));

        assert_eq!(
            parse(json!({"type": "toggle_completed", "id": id.to_string()})),
            TodoCommand::ToggleCompleted(TodoRef::Id(id))
        );
        assert_eq!(
            parse(json!({"type": "remove_todo", "index": 2})),
            TodoCommand::RemoveTodo(TodoRef::Index(2))
        );
    }

    #[test]
    fn target_must_be_exactly_one_of_id_or_index() {
        let id = TodoId::from_uuid(Uuid::from_u128(3));

        let both = serde_json::from_value::<TodoCommand>(
            json!({"type": "toggle_completed", "id": id.to_string(), "index": 0}),
        )
        .unwrap_err();
        assert!(both.to_string().contains("found both"), "{both}");

        let neither =
            serde_json::from_value::<TodoCommand>(json!({"type": "remove_todo"})).unwrap_err();
        assert!(neither.to_string().contains("missing"), "{neither}");
    }

    #[test]
    fn target_rejects_unknown_keys() {
        for value in [
            json!({"type": "remove_todo", "index": 0, "idx": 1}),
            json!({"type": "toggle_completed", "Id": "00000000-0000-0000-0000-000000000001"}),
        ] {
            assert!(serde_json::from_value::<TodoCommand>(value).is_err());
        }
    }

    #[test]
    fn rejects_malformed_commands() {
        for value in [
            json!({"type": "toggle_completed"}),
            json!({"type": "remove_todo", "index": -1}),
            json!({"type": "launch_rockets"}),
            json!({"text": "no type"}),
        ] {
            assert!(serde_json::from_value::<TodoCommand>(value).is_err());
        }
    }

    #[test]
    fn converts_into_actions() {
        let action: TodoAction = TodoCommand::ToggleCompleted(TodoRef::Index(0)).into();

        assert_eq!(
            action,
            TodoAction::ToggleCompleted {
                target: TodoRef::Index(0)
            }
        );
        assert_eq!(action.name(), "toggle_completed");
    }
}

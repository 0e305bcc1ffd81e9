//! Errors raised by rejected todo-list operations.

use crate::types::TodoId;
use thiserror::Error;

/// Why the model refused an operation
///
/// Every variant is recoverable: the model leaves its state untouched when
/// it returns one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// An index-addressed operation named a position past the end of the list
    #[error("index {index} is out of range for {len} todos")]
    OutOfRange {
        /// Requested position in the unfiltered list
        index: usize,
        /// Number of todos at the time of the request
        len: usize,
    },

    /// An id-addressed operation named an item that does not exist
    #[error("todo {id} not found")]
    UnknownTodo {
        /// Requested id
        id: TodoId,
    },

    /// A new item was given an id that is already in the list
    #[error("todo {id} already exists")]
    DuplicateId {
        /// The id already in use
        id: TodoId,
    },

    /// A filter value outside `all`, `active`, `completed`
    #[error("invalid filter {value:?}; expected one of all, active, completed")]
    InvalidFilter {
        /// The rejected value
        value: String,
    },
}

impl TodoError {
    /// Stable machine-readable code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::UnknownTodo { .. } => "UNKNOWN_TODO",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
            Self::InvalidFilter { .. } => "INVALID_FILTER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn messages_name_the_offending_input() {
        let err = TodoError::OutOfRange { index: 3, len: 1 };
        assert_eq!(err.to_string(), "index 3 is out of range for 1 todos");

        let err = TodoError::InvalidFilter {
            value: "done".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid filter \"done\"; expected one of all, active, completed"
        );

        let err = TodoError::UnknownTodo {
            id: TodoId::from_uuid(Uuid::from_u128(7)),
        };
        assert_eq!(
            err.to_string(),
            "todo 00000000-0000-0000-0000-000000000007 not found"
        );

        let err = TodoError::DuplicateId {
            id: TodoId::from_uuid(Uuid::from_u128(7)),
        };
        assert_eq!(
            err.to_string(),
            "todo 00000000-0000-0000-0000-000000000007 already exists"
        );
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(TodoError::OutOfRange { index: 0, len: 0 }.code(), "OUT_OF_RANGE");
        assert_eq!(
            TodoError::InvalidFilter { value: String::new() }.code(),
            "INVALID_FILTER"
        );
        assert_eq!(
            TodoError::DuplicateId {
                id: TodoId::from_uuid(Uuid::nil())
            }
            .code(),
            "DUPLICATE_ID"
        );
    }
}

//! The view selector.

use crate::error::TodoError;
use crate::types::TodoItem;
use serde::Serialize;
use std::str::FromStr;

/// Which todos the derived view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl Filter {
    /// All filters, in the order the page lists them
    pub const OPTIONS: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Wire value (`"all"`, `"active"`, `"completed"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Human label for the filter selector
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Whether `item` belongs in the view under this filter
    #[must_use]
    pub const fn matches(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed(),
            Self::Completed => item.completed(),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the wire value
impl FromStr for Filter {
    type Err = TodoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::OPTIONS
            .into_iter()
            .find(|filter| filter.as_str() == value)
            .ok_or_else(|| TodoError::InvalidFilter {
                value: value.to_string(),
            })
    }
}

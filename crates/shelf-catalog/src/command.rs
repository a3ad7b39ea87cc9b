#![forbid(unsafe_code)]

//! Command ids shared with the remote control bridge.
//!
//! A remote client names a command by id only: `reset_filters`, a filter
//! value such as `female` or `middle_class`, or `group:<category>`. Value ids
//! are not unique across categories (`unknown`, `fully`, ...); the first
//! category in priority order wins.

use std::fmt;

use crate::categories::{self, Category};

pub const RESET_COMMAND: &str = "reset_filters";
/// Prefix of ids that request an N-way grouping.
pub const GROUP_PREFIX: &str = "group:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset,
    Filter {
        category: &'static str,
        value: &'static str,
    },
    Group {
        category: &'static str,
    },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str(RESET_COMMAND),
            Self::Filter { value, .. } => f.write_str(&command_id(value)),
            Self::Group { category } => write!(f, "{GROUP_PREFIX}{category}"),
        }
    }
}

/// Id for a filter value: lower-cased, whitespace runs replaced by `_`.
pub fn command_id(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Map an id to its command.
pub fn resolve_command(id: &str) -> Option<Command> {
    if id == RESET_COMMAND {
        return Some(Command::Reset);
    }
    if let Some(path) = id.strip_prefix(GROUP_PREFIX) {
        return categories::category(path).map(|c| Command::Group { category: c.path });
    }
    categories::by_priority().find_map(|category| {
        category
            .values
            .iter()
            .find(|value| command_id(value) == id)
            .map(|&value| Command::Filter {
                category: category.path,
                value,
            })
    })
}

/// Every command in presentation order: reset, then each category's values
/// alphabetically, categories by priority.
pub fn command_list() -> Vec<Command> {
    let filters = categories::by_priority().flat_map(|category: &'static Category| {
        category
            .sorted_values()
            .into_iter()
            .map(move |value| Command::Filter {
                category: category.path,
                value,
            })
    });
    std::iter::once(Command::Reset).chain(filters).collect()
}

//! Outbound state command.

use serde::Serialize;

use super::Verb;

/// Value of the `cmd` key for every state transition command.
pub const STATE_CMD: &str = "state";

/// A `{"cmd": "state"}` command addressed to one group or to all groups.
///
/// Field declaration order is the wire key order: `cmd`, `state`, then
/// `group` when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateCommand {
    cmd: &'static str,
    state: Verb,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
}

impl StateCommand {
    /// Creates a command that applies to every group.
    #[must_use]
    pub const fn all_groups(state: Verb) -> Self {
        Self {
            cmd: STATE_CMD,
            state,
            group: None,
        }
    }

    /// Creates a command scoped to a single group.
    #[must_use]
    pub fn for_group(state: Verb, group: impl Into<String>) -> Self {
        Self {
            cmd: STATE_CMD,
            state,
            group: Some(group.into()),
        }
    }

    /// Creates a command from an optional group argument.
    #[must_use]
    pub fn new(state: Verb, group: Option<String>) -> Self {
        Self {
            cmd: STATE_CMD,
            state,
            group,
        }
    }

    /// Requested state transition.
    #[must_use]
    pub const fn state(&self) -> Verb {
        self.state
    }

    /// Target group, `None` for all groups.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

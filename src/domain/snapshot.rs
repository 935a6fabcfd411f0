//! Initial state snapshot sent by the client on connect.
//!
//! The client pushes its full state as the first frame of every control
//! connection. Only the `groups` object is consumed here; group status
//! objects are kept opaque.

use std::collections::BTreeMap;

use serde_json::Value;

use super::GroupPolicy;
use crate::error::CtlError;

/// Group table extracted from the client's initial state message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    groups: BTreeMap<String, Value>,
}

impl StateSnapshot {
    /// Parses the text of the first frame received from the client.
    ///
    /// # Errors
    ///
    /// Returns [`CtlError::MalformedSnapshot`] if the text is not JSON and
    /// [`CtlError::Protocol`] if it is not an object with a `groups` object.
    pub fn parse(text: &str) -> Result<Self, CtlError> {
        let value: Value = serde_json::from_str(text).map_err(CtlError::MalformedSnapshot)?;
        Self::from_value(value)
    }

    /// Builds a snapshot from an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CtlError::Protocol`] if `value` is not an object carrying
    /// a `groups` object.
    pub fn from_value(value: Value) -> Result<Self, CtlError> {
        let Value::Object(mut root) = value else {
            return Err(CtlError::Protocol(
                "state snapshot is not a JSON object".to_string(),
            ));
        };
        match root.remove("groups") {
            Some(Value::Object(groups)) => Ok(Self {
                groups: groups.into_iter().collect(),
            }),
            Some(_) => Err(CtlError::Protocol(
                "`groups` in state snapshot is not an object".to_string(),
            )),
            None => Err(CtlError::Protocol(
                "state snapshot has no `groups` key".to_string(),
            )),
        }
    }

    /// Returns `true` if the client reported a group with this identifier.
    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Group identifiers in sorted order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of groups reported by the client.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the client reported no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Checks a requested group against the snapshot.
    ///
    /// `None` targets every group and always passes. An unknown group is
    /// rejected or let through according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`CtlError::UnknownGroup`] if the group is absent and the
    /// policy is [`GroupPolicy::Reject`].
    pub fn validate_group(&self, group: Option<&str>, policy: GroupPolicy) -> Result<(), CtlError> {
        let Some(group) = group else {
            return Ok(());
        };
        if self.contains(group) {
            return Ok(());
        }
        match policy {
            GroupPolicy::Reject => Err(CtlError::UnknownGroup {
                group: group.to_string(),
                available: self.describe_groups(),
            }),
            GroupPolicy::Pass => {
                tracing::warn!(group, "group not in client state; sending anyway");
                Ok(())
            }
        }
    }

    fn describe_groups(&self) -> String {
        if self.is_empty() {
            return "none".to_string();
        }
        self.group_names()
            .map(|name| if name.is_empty() { "\"\"" } else { name })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

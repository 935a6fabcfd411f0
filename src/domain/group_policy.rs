//! Handling of group identifiers missing from the client state.

use std::fmt;
use std::str::FromStr;

/// What to do when the requested group is not in the state snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupPolicy {
    /// Fail with a validation error and send nothing.
    #[default]
    Reject,
    /// Log a warning and send the command anyway.
    Pass,
}

impl FromStr for GroupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "pass" => Ok(Self::Pass),
            other => Err(format!(
                "unknown group policy `{other}` (expected reject or pass)"
            )),
        }
    }
}

impl fmt::Display for GroupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reject => "reject",
            Self::Pass => "pass",
        })
    }
}

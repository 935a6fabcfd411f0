//! State transition verbs understood by the client.

use std::fmt;

use serde::Serialize;

/// A requested state transition for one group or for all groups.
///
/// The set is closed: these are the only `state` values the client
/// accepts in a `{"cmd": "state"}` command. Command-line parsing goes
/// through the `ValueEnum` derive, whose names match [`Verb::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Start or resume folding.
    Fold,
    /// Pause folding immediately.
    Pause,
    /// Finish the current work units, then pause.
    Finish,
}

impl Verb {
    /// Wire name of the verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Pause => "pause",
            Self::Finish => "finish",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn cli_names_match_wire_names() {
        for verb in Verb::value_variants() {
            let name = verb
                .to_possible_value()
                .map(|value| value.get_name().to_string());
            assert_eq!(name.as_deref(), Some(verb.as_str()));
        }
    }

    #[test]
    fn cli_parsing_is_case_sensitive() {
        assert_eq!(Verb::from_str("pause", false), Ok(Verb::Pause));
        assert!(Verb::from_str("Fold", false).is_err());
        assert!(Verb::from_str("unpause", false).is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Verb::Finish).unwrap_or_default();
        assert_eq!(json, "\"finish\"");
    }
}

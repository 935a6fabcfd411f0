//! Command-line argument parsing.

use std::ffi::OsString;

use clap::{ArgAction, Parser};

use crate::domain::{StateCommand, Verb};
use crate::error::CtlError;

/// `fahctl <VERB> [GROUP]`
#[derive(Debug, Clone, Parser)]
#[command(name = "fahctl", version)]
#[command(about = "Send a state command to a running Folding@home client")]
pub struct Cli {
    /// State transition to request
    #[arg(value_enum, value_name = "VERB")]
    pub verb: Verb,

    /// Group to target; all groups when omitted
    #[arg(value_name = "GROUP")]
    pub group: Option<String>,

    /// Client host [env: FAHCTL_HOST, default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Client control port [env: FAHCTL_PORT, default: 7396]
    #[arg(long)]
    pub port: Option<u16>,

    /// Per-step network timeout in seconds [env: FAHCTL_TIMEOUT_SECS, default: 5]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Send even if GROUP is not reported by the client
    #[arg(long)]
    pub allow_unknown_group: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parses an argument list, first element being the program name.
    ///
    /// # Errors
    ///
    /// Returns [`CtlError::Usage`] for a missing or unknown verb, extra
    /// positional arguments, or invalid options. Help and version
    /// requests are reported through the same variant.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, CtlError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::try_parse_from(args)?)
    }

    /// The command described by the positional arguments.
    #[must_use]
    pub fn command(&self) -> StateCommand {
        StateCommand::new(self.verb, self.group.clone())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        match Cli::try_parse_args(args.iter().copied()) {
            Ok(cli) => cli,
            Err(err) => panic!("parse failed: {err}"),
        }
    }

    fn usage_kind(args: &[&str]) -> ErrorKind {
        match Cli::try_parse_args(args.iter().copied()) {
            Err(CtlError::Usage(err)) => err.kind(),
            other => panic!("expected usage error, got {other:?}"),
        }
    }

    #[test]
    fn verb_only_targets_all_groups() {
        let cli = parse(&["fahctl", "fold"]);
        assert_eq!(cli.command(), StateCommand::all_groups(Verb::Fold));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.allow_unknown_group);
    }

    #[test]
    fn verb_and_group() {
        let cli = parse(&["fahctl", "pause", "gpu"]);
        assert_eq!(cli.command(), StateCommand::for_group(Verb::Pause, "gpu"));
    }

    #[test]
    fn finish_is_accepted() {
        assert_eq!(parse(&["fahctl", "finish"]).verb, Verb::Finish);
    }

    #[test]
    fn missing_verb_is_usage_error() {
        assert_eq!(
            usage_kind(&["fahctl"]),
            ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn unknown_verb_is_usage_error() {
        assert_eq!(usage_kind(&["fahctl", "explode"]), ErrorKind::InvalidValue);
    }

    #[test]
    fn extra_positional_is_usage_error() {
        assert_eq!(
            usage_kind(&["fahctl", "fold", "gpu", "cpu"]),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn usage_errors_exit_with_two() {
        let Err(err) = Cli::try_parse_args(["fahctl"]) else {
            panic!("missing verb must fail");
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn zero_timeout_is_usage_error() {
        assert_eq!(
            usage_kind(&["fahctl", "--timeout", "0", "fold"]),
            ErrorKind::ValueValidation
        );
        assert_eq!(parse(&["fahctl", "--timeout", "1", "fold"]).timeout, Some(1));
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["fahctl", "-vv", "fold"]).verbose, 2);
    }
}

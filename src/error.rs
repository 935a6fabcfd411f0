//! Control utility error types with process exit code mapping.
//!
//! [`CtlError`] is the central error type of the crate. Each variant maps
//! to a process exit code so `main` can report failures uniformly.

use std::time::Duration;

use tokio_tungstenite::tungstenite;

/// Client-side error enum with exit code mapping.
///
/// # Exit Codes
///
/// | Code | Category   | Variants                                 |
/// |------|------------|------------------------------------------|
/// | 1    | Internal   | `Encode`                                 |
/// | 2    | Usage      | `Usage`, `Config`                        |
/// | 3    | Connection | `Connection`, `Timeout`, `Transport`     |
/// | 4    | Protocol   | `Protocol`, `MalformedSnapshot`          |
/// | 5    | Validation | `UnknownGroup`                           |
#[derive(Debug, thiserror::Error)]
pub enum CtlError {
    /// Missing or unrecognized verb, bad argument count, or bad option.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// Environment configuration could not be interpreted.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The control endpoint could not be reached.
    #[error("cannot connect to {endpoint}: {reason}")]
    Connection {
        /// Endpoint URL that was dialed.
        endpoint: String,
        /// Underlying failure, rendered for display.
        reason: String,
    },

    /// A network step did not complete within the configured timeout.
    #[error("timed out after {timeout:?} while {step}")]
    Timeout {
        /// Which step expired (`"connecting"`, `"waiting for client state"`, ...).
        step: &'static str,
        /// Configured per-step timeout.
        timeout: Duration,
    },

    /// WebSocket transport failure after the connection was established.
    #[error("transport error: {0}")]
    Transport(#[from] tungstenite::Error),

    /// The control endpoint did not follow the expected exchange.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The state snapshot was not valid JSON.
    #[error("malformed state snapshot: {0}")]
    MalformedSnapshot(#[source] serde_json::Error),

    /// The requested group is not present in the state snapshot.
    #[error("unknown group `{group}` (available: {available})")]
    UnknownGroup {
        /// Group identifier given on the command line.
        group: String,
        /// Comma separated list of groups reported by the client.
        available: String,
    },

    /// The outbound command could not be serialized.
    #[error("failed to encode command: {0}")]
    Encode(String),
}

impl CtlError {
    /// Returns the process exit code for this variant.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Encode(_) => 1,
            Self::Usage(_) | Self::Config(_) => 2,
            Self::Connection { .. } | Self::Timeout { .. } | Self::Transport(_) => 3,
            Self::Protocol(_) | Self::MalformedSnapshot(_) => 4,
            Self::UnknownGroup { .. } => 5,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_non_zero() {
        let errors = [
            CtlError::Config("bad".to_string()),
            CtlError::Connection {
                endpoint: "ws://127.0.0.1:7396/api/websocket".to_string(),
                reason: "refused".to_string(),
            },
            CtlError::Timeout {
                step: "connecting",
                timeout: Duration::from_secs(5),
            },
            CtlError::Protocol("closed".to_string()),
            CtlError::UnknownGroup {
                group: "gpu".to_string(),
                available: "cpu".to_string(),
            },
            CtlError::Encode("oops".to_string()),
        ];
        for err in &errors {
            assert_ne!(err.exit_code(), 0, "{err}");
        }
    }

    #[test]
    fn categories_map_to_distinct_codes() {
        let connection = CtlError::Timeout {
            step: "connecting",
            timeout: Duration::from_millis(250),
        };
        assert_eq!(
            connection.to_string(),
            "timed out after 250ms while connecting"
        );
        let protocol = CtlError::Protocol("x".to_string());
        let validation = CtlError::UnknownGroup {
            group: "a".to_string(),
            available: String::new(),
        };
        assert_eq!(connection.exit_code(), 3);
        assert_eq!(protocol.exit_code(), 4);
        assert_eq!(validation.exit_code(), 5);
    }

    #[test]
    fn malformed_snapshot_is_protocol_failure() {
        let Err(json_err) = serde_json::from_str::<serde_json::Value>("{") else {
            panic!("expected parse failure");
        };
        let err = CtlError::MalformedSnapshot(json_err);
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().starts_with("malformed state snapshot"));
    }

    #[test]
    fn unknown_group_message_lists_available() {
        let err = CtlError::UnknownGroup {
            group: "gpu".to_string(),
            available: "cpu, default".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown group `gpu` (available: cpu, default)"
        );
        assert_eq!(err.exit_code(), 5);
    }
}

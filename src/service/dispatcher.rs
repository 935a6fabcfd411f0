//! Command dispatcher: one snapshot read, one validated send.

use crate::config::CtlConfig;
use crate::domain::{GroupPolicy, StateCommand, StateSnapshot};
use crate::error::CtlError;
use crate::ws::channel::{ControlChannel, WsChannel};
use crate::ws::codec;

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    /// Exact text frame written to the connection.
    pub wire: String,
    /// Client state the command was validated against.
    pub snapshot: StateSnapshot,
}

/// Sends a single state command over a [`ControlChannel`].
///
/// Every dispatch follows the same exchange: receive the client state,
/// validate the target group, encode, send once, close. The snapshot is
/// read even when no group is given so the exchange never varies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    policy: GroupPolicy,
}

impl Dispatcher {
    /// Creates a dispatcher applying `policy` to unknown groups.
    #[must_use]
    pub const fn new(policy: GroupPolicy) -> Self {
        Self { policy }
    }

    /// Runs the exchange and closes the channel, whatever the outcome.
    ///
    /// A failure to close after a successful send is logged, not
    /// returned: the command has already been delivered.
    ///
    /// # Errors
    ///
    /// Returns a [`CtlError`] if the state cannot be read or parsed, the
    /// group is rejected, or the send fails. Nothing is sent in the first
    /// two cases.
    pub async fn dispatch<C>(
        &self,
        channel: &mut C,
        command: StateCommand,
    ) -> Result<Dispatched, CtlError>
    where
        C: ControlChannel,
    {
        let result = self.exchange(channel, command).await;
        if let Err(err) = channel.close().await {
            tracing::debug!(%err, "failed to close control connection");
        }
        result
    }

    async fn exchange<C>(
        &self,
        channel: &mut C,
        command: StateCommand,
    ) -> Result<Dispatched, CtlError>
    where
        C: ControlChannel,
    {
        let text = channel.recv_text().await?.ok_or_else(|| {
            CtlError::Protocol("connection closed before client state was received".to_string())
        })?;
        let snapshot = StateSnapshot::parse(&text)?;
        tracing::debug!(groups = snapshot.len(), "received client state");

        snapshot.validate_group(command.group(), self.policy)?;

        let wire = codec::encode_command(&command)?;
        channel.send_text(wire.clone()).await?;
        tracing::info!(
            state = %command.state(),
            group = command.group().unwrap_or("*"),
            "state command sent"
        );

        Ok(Dispatched {
            wire,
            snapshot,
        })
    }
}

/// Connects to the configured endpoint and dispatches `command`.
///
/// # Errors
///
/// Returns [`CtlError::Connection`] or [`CtlError::Timeout`] if the
/// endpoint cannot be reached, and any error of [`Dispatcher::dispatch`].
pub async fn run(config: &CtlConfig, command: StateCommand) -> Result<Dispatched, CtlError> {
    tracing::info!(endpoint = %config.endpoint, "connecting");
    let mut channel = WsChannel::connect(&config.endpoint, config.timeout).await?;
    Dispatcher::new(config.group_policy)
        .dispatch(&mut channel, command)
        .await
}

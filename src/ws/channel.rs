//! Control channel to the client's WebSocket endpoint.
//!
//! [`ControlChannel`] is the seam between the dispatcher and the socket:
//! the dispatcher only needs to receive one text frame, send one text
//! frame and close. [`WsChannel`] implements it over `tokio-tungstenite`
//! with a per-step timeout. A receive step ends at its deadline no matter
//! how many ping/pong frames arrive in the meantime.

use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::config::Endpoint;
use crate::error::CtlError;

/// Text-frame transport used by the dispatcher.
pub trait ControlChannel {
    /// Receives the next text payload, skipping control frames.
    ///
    /// Resolves to `Ok(None)` once the peer has closed the connection.
    fn recv_text(&mut self) -> impl Future<Output = Result<Option<String>, CtlError>> + Send;

    /// Sends one text frame.
    fn send_text(&mut self, text: String) -> impl Future<Output = Result<(), CtlError>> + Send;

    /// Starts the closing handshake.
    fn close(&mut self) -> impl Future<Output = Result<(), CtlError>> + Send;
}

/// WebSocket connection to a running client.
#[derive(Debug)]
pub struct WsChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    timeout: Duration,
}

impl WsChannel {
    /// Opens a connection to `endpoint`, bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`CtlError::Timeout`] if the handshake does not finish in
    /// time and [`CtlError::Connection`] if the endpoint refuses it.
    pub async fn connect(endpoint: &Endpoint, timeout: Duration) -> Result<Self, CtlError> {
        let url = endpoint.url();
        tracing::debug!(%url, "connecting to client");

        let connect = tokio_tungstenite::connect_async(url.as_str());
        let (stream, response) = match tokio::time::timeout(timeout, connect).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(err)) => {
                return Err(CtlError::Connection {
                    endpoint: url,
                    reason: err.to_string(),
                });
            }
            Err(_) => {
                return Err(CtlError::Timeout {
                    step: "connecting",
                    timeout,
                });
            }
        };

        tracing::debug!(status = %response.status(), "websocket handshake complete");
        Ok(Self { stream, timeout })
    }
}

impl ControlChannel for WsChannel {
    async fn recv_text(&mut self) -> Result<Option<String>, CtlError> {
        // One deadline for the whole step; control frames must not extend it.
        let deadline = Instant::now() + self.timeout;
        loop {
            let next = tokio::time::timeout_at(deadline, self.stream.next())
                .await
                .map_err(|_| CtlError::Timeout {
                    step: "waiting for client state",
                    timeout: self.timeout,
                })?;

            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(text.as_str().to_owned())),
                Some(Ok(Message::Binary(bytes))) => {
                    return String::from_utf8(bytes.to_vec()).map(Some).map_err(|_| {
                        CtlError::Protocol("binary frame is not valid UTF-8".to_string())
                    });
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "client closed connection");
                    return Ok(None);
                }
                // Ping/pong are answered by tungstenite itself.
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => return Ok(None),
            }
        }
    }

    async fn send_text(&mut self, text: String) -> Result<(), CtlError> {
        tokio::time::timeout(self.timeout, self.stream.send(Message::text(text)))
            .await
            .map_err(|_| CtlError::Timeout {
                step: "sending command",
                timeout: self.timeout,
            })??;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), CtlError> {
        tokio::time::timeout(self.timeout, self.stream.close(None))
            .await
            .map_err(|_| CtlError::Timeout {
                step: "closing connection",
                timeout: self.timeout,
            })??;
        Ok(())
    }
}

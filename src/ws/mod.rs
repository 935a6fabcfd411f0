//! WebSocket layer: control channel and wire encoding.
//!
//! The client exposes its control API at `/api/websocket`. On connect it
//! pushes its full state; commands are JSON text frames.

pub mod channel;
pub mod codec;

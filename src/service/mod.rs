//! Service layer: the single connect, validate and send exchange.
//!
//! [`Dispatcher`] drives any [`crate::ws::channel::ControlChannel`];
//! [`run`] wires it to a live WebSocket connection.

pub mod dispatcher;

pub use dispatcher::{Dispatched, Dispatcher, run};

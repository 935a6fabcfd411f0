//! # fahctl
//!
//! Command-line control utility for a running Folding@home client.
//!
//! Sends one state transition (`fold`, `pause`, `finish`) over the
//! client's local WebSocket API, either to every resource group or to a
//! single named group that is first checked against the client state.
//!
//! ## Exchange
//!
//! ```text
//! fahctl pause gpu
//!     │
//!     ├── connect   ws://127.0.0.1:7396/api/websocket
//!     ├── receive   {"groups": {"gpu": {...}, ...}, ...}
//!     ├── validate  "gpu" ∈ groups
//!     ├── send      {"cmd": "state", "state": "pause", "group": "gpu"}
//!     └── close
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod telemetry;
pub mod ws;

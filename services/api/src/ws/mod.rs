//! WebSocket Coaching Sessions
//!
//! This module connects browser WebSockets to the core coaching session:
//!
//! - `protocol`: Defines the JSON message format sent to the client.
//! - `session`: Manages the connection lifecycle and adapts the socket to the
//!   session's transport trait.

pub mod protocol;
pub mod session;

pub use session::ws_handler;

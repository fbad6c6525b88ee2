//! Pitch Coach API Library Crate
//!
//! This library contains the web-facing half of the pitch coach: configuration,
//! shared state, REST handlers, the WebSocket coaching endpoint and routing.
//! The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod ws;

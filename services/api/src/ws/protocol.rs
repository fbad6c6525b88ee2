//! Defines the WebSocket message protocol between the browser client and the API server.
//!
//! Inbound frames (`{"pitch": ...}` then `{"reply": ...}`) are decoded by the
//! core session itself; this module only covers what the server sends.

use pitch_coach_core::{Command, error::FailureKind};
use serde::Serialize;

/// Messages sent from the server to the client (browser).
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// An informational notice, e.g. the greeting after the opening pitch.
    Notice { message: String },
    /// A coaching message from one of the personas.
    CoachMessage { agent: String, message: String },
    /// The script is finished; the server closes the socket next.
    Complete { message: String },
    /// Reports a fatal session error to the client.
    Error { kind: FailureKind, message: String },
}

impl From<Command> for ServerMessage {
    fn from(command: Command) -> Self {
        match command {
            Command::Notice(message) => ServerMessage::Notice { message },
            Command::CoachMessage { agent, message } => {
                ServerMessage::CoachMessage { agent, message }
            }
            Command::SessionComplete(message) => ServerMessage::Complete { message },
            Command::Error { kind, message } => ServerMessage::Error { kind, message },
        }
    }
}

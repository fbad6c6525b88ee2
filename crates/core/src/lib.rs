pub mod error;
pub mod llm_client;
pub mod memory;
pub mod persona;
pub mod polish;
pub mod script;
pub mod session;
pub mod transcription;

use error::FailureKind;

/// Represents commands that the core logic issues to an external runtime.
///
/// This enum is the primary API for decoupling the session's decision-making
/// from the runtime's delivery of messages to the founder.
#[derive(Debug, Clone)]
pub enum Command {
    /// An informational notice, such as the greeting after the handshake.
    Notice(String),
    /// A coaching message generated for the current step.
    CoachMessage { agent: String, message: String },
    /// The script has finished; the connection will be closed.
    SessionComplete(String),
    /// The session is ending because of a failure.
    Error { kind: FailureKind, message: String },
}

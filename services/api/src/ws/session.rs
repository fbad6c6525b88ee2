//! Manages the WebSocket connection lifecycle for a coaching session.

use super::protocol::ServerMessage;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use pitch_coach_core::{
    Command,
    error::SessionError,
    script::COACHING_SCRIPT,
    session::{CoachingSession, SessionTransport},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Axum handler to upgrade an HTTP connection to a WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Main handler for an individual WebSocket connection.
///
/// Every connection gets its own `CoachingSession`, which lives exactly as
/// long as the socket. The session performs the pitch handshake, runs the
/// script, and on any failure reports a typed error before closing.
#[instrument(name = "ws_session", skip_all, fields(session_id))]
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    tracing::Span::current().record("session_id", tracing::field::display(session_id));
    info!("New WebSocket connection. Awaiting opening pitch...");

    let mut session = CoachingSession::new(
        &COACHING_SCRIPT,
        state.llm_client.clone(),
        WebSocketTransport::new(socket),
        state.config.session_timeouts(),
    );

    let result = match session.accept_pitch().await {
        Ok(()) => session.run_to_completion().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => info!("Coaching session finished."),
        Err(e) => {
            error!(error = %e, step = session.cursor(), turns = session.memory().len(), "Coaching session terminated with error.");
            session.report_failure(&e).await;
        }
    }
}

/// Adapts an axum `WebSocket` to the core session's transport.
pub struct WebSocketTransport {
    socket: WebSocket,
}

impl WebSocketTransport {
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl SessionTransport for WebSocketTransport {
    async fn send(&mut self, command: Command) -> Result<(), SessionError> {
        let serialized = serde_json::to_string(&ServerMessage::from(command))
            .map_err(|e| SessionError::Transport(e.to_string()))?;
        self.socket
            .send(Message::Text(serialized.into()))
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))
    }

    async fn recv(&mut self) -> Result<Option<String>, SessionError> {
        while let Some(msg_result) = self.socket.recv().await {
            match msg_result.map_err(|e| SessionError::Transport(e.to_string()))? {
                Message::Text(text) => return Ok(Some(text.as_str().to_owned())),
                Message::Binary(_) => {
                    return Err(SessionError::MalformedInput(
                        "binary frames are not accepted; send JSON text".to_string(),
                    ));
                }
                Message::Close(_) => {
                    info!("Client sent close frame.");
                    return Ok(None);
                }
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
        Ok(None)
    }

    async fn close(&mut self) {
        if let Err(e) = self.socket.send(Message::Close(None)).await {
            debug!(error = %e, "Socket already closed.");
        }
    }
}

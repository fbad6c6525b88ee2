//! Coaching Session State Machine
//!
//! A `CoachingSession` walks one founder through the step script exactly once.
//! It owns the step cursor, the conversation memory and the transport to the
//! client. Turn-taking is strictly sequential: generate, emit, wait for one
//! reply, advance. The only suspension points are the backend call and the
//! reply wait, and both are bounded by [`SessionTimeouts`].
//!
//! Any failure ends the session. A failed step never advances the cursor, and
//! turns already recorded are never rolled back.

use crate::{
    Command,
    error::{SessionError, with_deadline},
    llm_client::LLMClient,
    memory::{Memory, Turn},
    script::Step,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const GREETING: &str = "✅ Awesome! Let's build your pitch step by step.";
pub const COMPLETION_NOTICE: &str = "🎉 Pitch coaching complete! Want to run another iteration?";

/// The duplex channel between a session and its client.
///
/// Implementations deliver raw inbound text frames; decoding them against the
/// expected schema is the session's job.
#[async_trait]
pub trait SessionTransport: Send {
    async fn send(&mut self, command: Command) -> Result<(), SessionError>;

    /// Waits for the next inbound text frame. `Ok(None)` means the peer closed
    /// the connection.
    async fn recv(&mut self) -> Result<Option<String>, SessionError>;

    /// Closes the connection from the server side.
    async fn close(&mut self);
}

/// The opening message of a session.
#[derive(Deserialize, Debug)]
pub struct PitchMessage {
    pub pitch: String,
}

/// A founder's answer to the current step.
#[derive(Deserialize, Debug)]
pub struct ReplyMessage {
    pub reply: String,
}

/// Upper bounds for the two waits inside a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionTimeouts {
    pub generation: Duration,
    pub reply: Duration,
}

impl Default for SessionTimeouts {
    fn default() -> Self {
        Self {
            generation: Duration::from_secs(120),
            reply: Duration::from_secs(900),
        }
    }
}

pub struct CoachingSession<T: SessionTransport> {
    script: &'static [Step],
    llm_client: Arc<dyn LLMClient>,
    transport: T,
    timeouts: SessionTimeouts,
    memory: Memory,
    cursor: usize,
    started: bool,
}

impl<T: SessionTransport> CoachingSession<T> {
    pub fn new(
        script: &'static [Step],
        llm_client: Arc<dyn LLMClient>,
        transport: T,
        timeouts: SessionTimeouts,
    ) -> Self {
        Self {
            script,
            llm_client,
            transport,
            timeouts,
            memory: Memory::default(),
            cursor: 0,
            started: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.script.len()
    }

    /// Seeds memory with the founder's opening pitch. Allowed exactly once.
    pub fn start(&mut self, initial_text: impl Into<String>) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::AlreadyStarted);
        }
        self.memory.push(Turn::founder(initial_text));
        self.started = true;
        Ok(())
    }

    /// Performs the handshake: reads the opening pitch, starts the session and
    /// greets the founder.
    pub async fn accept_pitch(&mut self) -> Result<(), SessionError> {
        let frame = self.next_frame().await?;
        let PitchMessage { pitch } = parse_frame(&frame)?;
        self.start(pitch)?;
        info!("Opening pitch received");
        self.transport
            .send(Command::Notice(GREETING.to_string()))
            .await
    }

    /// Runs every remaining step in order, then announces completion and
    /// closes the transport.
    pub async fn run_to_completion(&mut self) -> Result<(), SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }

        let script = self.script;
        while let Some(step) = script.get(self.cursor) {
            self.execute_step(step).await?;
        }

        self.transport
            .send(Command::SessionComplete(COMPLETION_NOTICE.to_string()))
            .await?;
        self.transport.close().await;
        info!(steps = self.cursor, "Coaching script completed");
        Ok(())
    }

    /// Tells the client why the session ended, then closes the transport.
    pub async fn report_failure(&mut self, err: &SessionError) {
        if !matches!(err, SessionError::Disconnected | SessionError::Transport(_)) {
            let notice = Command::Error {
                kind: err.kind(),
                message: err.to_string(),
            };
            if let Err(send_err) = self.transport.send(notice).await {
                warn!(error = %send_err, "Could not deliver error to client");
            }
        }
        self.transport.close().await;
    }

    async fn execute_step(&mut self, step: &'static Step) -> Result<(), SessionError> {
        let index = self.cursor;
        let agent = step.persona.role;
        info!(step = index, agent, "Executing coaching step");

        let prompt = step.render_prompt(&self.memory);
        let response = with_deadline(
            self.timeouts.generation,
            self.llm_client.generate(step.persona, &prompt),
        )
        .await
        .map_err(|source| SessionError::Backend {
            step: index,
            source,
        })?;

        self.memory.push(Turn::coach(agent, response.clone()));
        self.transport
            .send(Command::CoachMessage {
                agent: agent.to_string(),
                message: response,
            })
            .await?;

        let frame = self.next_frame().await?;
        let ReplyMessage { reply } = parse_frame(&frame)?;
        self.memory.push(Turn::founder(reply));

        self.cursor += 1;
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<String, SessionError> {
        let limit = self.timeouts.reply;
        match tokio::time::timeout(limit, self.transport.recv()).await {
            Err(_) => Err(SessionError::ReplyTimeout(limit)),
            Ok(frame) => frame?.ok_or(SessionError::Disconnected),
        }
    }
}

fn parse_frame<M: for<'de> Deserialize<'de>>(frame: &str) -> Result<M, SessionError> {
    serde_json::from_str(frame).map_err(|e| SessionError::MalformedInput(e.to_string()))
}

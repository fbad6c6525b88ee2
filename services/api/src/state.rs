//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the shared,
//! clonable backend clients and configuration. Nothing in it is mutable:
//! every coaching session keeps its own state on its own task.

use crate::config::Config;
use pitch_coach_core::{llm_client::LLMClient, polish::PitchPolisher, transcription::Transcriber};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub llm_client: Arc<dyn LLMClient>,
    pub transcriber: Arc<dyn Transcriber>,
    pub polisher: PitchPolisher,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Config,
        llm_client: Arc<dyn LLMClient>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        let polisher = PitchPolisher::new(llm_client.clone(), config.generation_timeout);
        Self {
            llm_client,
            transcriber,
            polisher,
            config: Arc::new(config),
        }
    }
}

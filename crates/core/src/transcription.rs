//! Speech-to-text for founder voice notes.

use crate::error::BackendError;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{AudioInput, AudioResponseFormat, CreateTranscriptionRequestArgs},
};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Fallback name for uploads whose own name does not identify the container.
/// Browser `MediaRecorder` blobs arrive as WebM.
const DEFAULT_CLIP_NAME: &str = "audio.webm";

/// A recorded audio clip awaiting transcription.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// The backend infers the container format from the extension.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AudioClip {
    /// Wraps uploaded bytes, substituting a default file name when the
    /// supplied one has no extension.
    pub fn new(file_name: Option<&str>, bytes: Vec<u8>) -> Self {
        let file_name = match file_name {
            Some(name) if Path::new(name).extension().is_some() => name.to_string(),
            _ => DEFAULT_CLIP_NAME.to_string(),
        };
        Self { file_name, bytes }
    }
}

/// An audio transcription backend.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, clip: AudioClip, language: &str) -> Result<String, BackendError>;
}

/// A `Transcriber` backed by the OpenAI audio transcription endpoint.
pub struct OpenAITranscriber {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAITranscriber {
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl Transcriber for OpenAITranscriber {
    async fn transcribe(&self, clip: AudioClip, language: &str) -> Result<String, BackendError> {
        debug!(file_name = %clip.file_name, bytes = clip.bytes.len(), "Requesting transcription");
        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from_vec_u8(clip.file_name, clip.bytes))
            .model(&self.model)
            .language(language)
            .response_format(AudioResponseFormat::Json)
            .build()?;

        let response = self.client.audio().transcribe(request).await?;
        Ok(response.text)
    }
}

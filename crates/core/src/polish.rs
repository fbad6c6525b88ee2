//! One-shot pitch polishing.
//!
//! Rewrites a founder's raw (often transcribed) text into investor-ready
//! language. There is no session, no memory and no retry: one request, one
//! backend call, one answer.

use crate::error::{BackendError, with_deadline};
use crate::llm_client::LLMClient;
use crate::persona::PITCH_IMPROVER;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builds the rewrite instructions around the founder's raw text.
pub fn improvement_prompt(raw_text: &str) -> String {
    format!(
        r#"You are given a raw startup pitch transcription from a founder.

The text may be:
- unstructured
- too long
- repetitive
- unclear
- full of filler words
- slightly incorrect due to speech-to-text errors

Your job:

1. Rewrite the pitch in a more professional, investor-ready way.
2. Keep the EXACT same meaning and core idea.
3. Do NOT add new claims, features, or facts.
4. Make it clear, confident, and well-structured.
5. Output only the improved version (no explanations).

RAW USER TEXT:
"""{raw_text}"""

Return the improved pitch below:"#
    )
}

#[derive(Clone)]
pub struct PitchPolisher {
    client: Arc<dyn LLMClient>,
    timeout: Duration,
}

impl PitchPolisher {
    pub fn new(client: Arc<dyn LLMClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Returns the backend's rewrite of `raw_text`, trimmed of surrounding
    /// whitespace and nothing else.
    pub async fn polish(&self, raw_text: &str) -> Result<String, BackendError> {
        let prompt = improvement_prompt(raw_text);
        let improved = with_deadline(
            self.timeout,
            self.client.generate(&PITCH_IMPROVER, &prompt),
        )
        .await?;
        info!(input_len = raw_text.len(), output_len = improved.len(), "Pitch polished");
        Ok(improved.trim().to_string())
    }
}

use crate::error::BackendError;
use crate::persona::Persona;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

/// A text-generation backend: a prompt goes in, the persona's answer comes out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generates a single, complete response to `prompt`, speaking as `persona`.
    async fn generate(&self, persona: &Persona, prompt: &str) -> Result<String, BackendError>;
}

/// An implementation of `LLMClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-4o-mini").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl LLMClient for OpenAICompatibleClient {
    async fn generate(&self, persona: &Persona, prompt: &str) -> Result<String, BackendError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(persona.temperature)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(persona.system_prompt())
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        debug!(agent = persona.role, model = %self.model, "Requesting chat completion");
        let response: CreateChatCompletionResponse = self.client.chat().create(request).await?;
        extract_text(response)
    }
}

/// Pulls the first choice's text out of a completion, rejecting empty answers.
fn extract_text(response: CreateChatCompletionResponse) -> Result<String, BackendError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::Malformed("no choices in completion".to_string()))?
        .message
        .content
        .ok_or_else(|| BackendError::Malformed("completion had no text content".to_string()))?;

    if content.trim().is_empty() {
        return Err(BackendError::Malformed("completion text was blank".to_string()));
    }
    Ok(content)
}

/// A deterministic `LLMClient` for development and integration testing.
///
/// Responses are handed out in the order they were queued, and every prompt
/// received is recorded so callers can inspect exactly what was sent. Once the
/// queue is empty further calls fail with `BackendError::Unavailable`.
#[derive(Default)]
pub struct ScriptedLLMClient {
    responses: Mutex<VecDeque<Result<String, BackendError>>>,
    prompts: Mutex<Vec<(&'static str, String)>>,
}

impl ScriptedLLMClient {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::default();
        for response in responses {
            client.push_response(Ok(response.into()));
        }
        client
    }

    pub fn push_response(&self, response: Result<String, BackendError>) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
    }

    /// Every `(persona role, prompt)` pair received so far, oldest first.
    pub fn prompts(&self) -> Vec<(&'static str, String)> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LLMClient for ScriptedLLMClient {
    async fn generate(&self, persona: &Persona, prompt: &str) -> Result<String, BackendError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((persona.role, prompt.to_string()));
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Unavailable("no scripted response left".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{INVESTOR_QA, STRUCTURE_COACH};

    fn completion(content: serde_json::Value) -> CreateChatCompletionResponse {
        serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_extract_text_returns_content() {
        let text = extract_text(completion(serde_json::json!("What problem are you solving?")));
        assert_eq!(text.unwrap(), "What problem are you solving?");
    }

    #[test]
    fn test_extract_text_rejects_missing_or_blank_content() {
        assert!(matches!(
            extract_text(completion(serde_json::Value::Null)),
            Err(BackendError::Malformed(_))
        ));
        assert!(matches!(
            extract_text(completion(serde_json::json!("   \n"))),
            Err(BackendError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_scripted_client_replays_in_order_and_records_prompts() {
        let client = ScriptedLLMClient::new(["first", "second"]);

        assert_eq!(client.generate(&STRUCTURE_COACH, "p1").await.unwrap(), "first");
        assert_eq!(client.generate(&INVESTOR_QA, "p2").await.unwrap(), "second");
        assert!(matches!(
            client.generate(&INVESTOR_QA, "p3").await,
            Err(BackendError::Unavailable(_))
        ));

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[0], ("Pitch Structure Coach", "p1".to_string()));
        assert_eq!(prompts[1].0, "Investor Q&A Simulator");
    }
}

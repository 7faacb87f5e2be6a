//! OpenAI chat completion client.
//!
//! Calls `POST {base_url}/chat/completions` once per prompt. No retries: the
//! caller decides whether to re-send.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CompletionClient, CompletionError};
use crate::chat::ConversationTurn;
use crate::prompt::PromptSequence;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationTurn],
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

/// Completion client backed by the OpenAI-compatible chat API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    /// Creates a client for `base_url` (without the `/chat/completions` suffix).
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &PromptSequence) -> Result<Option<String>, CompletionError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&OpenAIRequest {
                model: &self.model,
                messages: prompt.turns(),
            })
            .send()
            .await
            .map_err(|e| CompletionError::Transport(format!("OpenAI request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: OpenAIResponse = resp
            .json()
            .await
            .map_err(|e| CompletionError::Decode(format!("OpenAI response parse error: {e}")))?;

        Ok(data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

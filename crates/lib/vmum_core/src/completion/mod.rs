//! Completion service seam.
//!
//! The relay talks to the external model through [`CompletionClient`] so the
//! composition root can inject the real OpenAI client and tests can inject a
//! recording mock.

pub mod openai;

use async_trait::async_trait;
use serde_json::{Value, json};
use thiserror::Error;

use crate::prompt::PromptSequence;

pub use openai::OpenAiClient;

/// Errors raised by a completion service call.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Completion service returned {status}")]
    Status { status: u16, body: Value },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl CompletionError {
    /// HTTP status reported by the service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Diagnostic object surfaced to callers in the `details` field.
    pub fn details(&self) -> Value {
        match self {
            CompletionError::Transport(message) => json!({ "message": message }),
            CompletionError::Status { status, body } => json!({
                "status": status,
                "message": self.to_string(),
                "payload": body,
            }),
            CompletionError::Decode(message) => json!({ "message": message }),
        }
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the prompt once and returns the generated text, if any.
    async fn complete(&self, prompt: &PromptSequence) -> Result<Option<String>, CompletionError>;

    /// Model identifier sent upstream.
    fn model(&self) -> &str;
}

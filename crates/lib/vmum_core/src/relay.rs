//! Chat relay — validates a request, assembles the prompt, calls the
//! completion service once and checks its reply.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error};

use crate::chat::ChatRequest;
use crate::completion::{CompletionClient, CompletionError};
use crate::prompt::{HISTORY_CAP, PERSONA, PromptSequence};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Failures of a single relay call.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("the 'message' field is required")]
    MissingMessage,

    #[error("server missing API key")]
    MissingApiKey,

    #[error("request to completion service failed: {0}")]
    Upstream(#[from] CompletionError),

    #[error("no reply from model")]
    EmptyReply,

    #[error("completion service timed out after {0:?}")]
    Timeout(Duration),
}

/// Stateless relay shared by all requests.
///
/// `client` is `None` when no credential is configured; every call then
/// fails with [`RelayError::MissingApiKey`] before any network traffic.
#[derive(Clone)]
pub struct ChatRelay {
    client: Option<Arc<dyn CompletionClient>>,
    instruction: Arc<str>,
    history_cap: usize,
    timeout: Duration,
}

impl ChatRelay {
    pub fn new(client: Option<Arc<dyn CompletionClient>>, timeout: Duration) -> Self {
        Self {
            client,
            instruction: Arc::from(PERSONA),
            history_cap: HISTORY_CAP,
            timeout,
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.client.as_deref().map(|c| c.model())
    }

    /// Runs one relay cycle and returns the trimmed reply text.
    pub async fn handle(&self, request: ChatRequest) -> Result<String> {
        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or(RelayError::MissingMessage)?;

        let client = self.client.as_deref().ok_or(RelayError::MissingApiKey)?;

        let history = request.history.unwrap_or_default();
        let prompt = PromptSequence::build(&self.instruction, &history, message, self.history_cap);
        debug!(
            model = client.model(),
            history_received = history.len(),
            history_kept = prompt.history_len(),
            "relaying chat message"
        );

        let outcome = match timeout(self.timeout, client.complete(&prompt)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                error!(timeout_secs = self.timeout.as_secs_f64(), "completion service timed out");
                return Err(RelayError::Timeout(self.timeout));
            }
        };

        let text = outcome.map_err(|e| {
            error!(
                status = ?e.status(),
                details = %e.details(),
                "completion request failed: {e}"
            );
            RelayError::from(e)
        })?;

        match text.as_deref().map(str::trim) {
            Some(reply) if !reply.is_empty() => Ok(reply.to_string()),
            _ => Err(RelayError::EmptyReply),
        }
    }
}

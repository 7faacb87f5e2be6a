//! Conversation types shared by the relay and the HTTP layer.

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn.
///
/// Closed set: an unknown role string fails deserialization instead of being
/// forwarded to the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message unit in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Inbound chat request body.
///
/// Both fields are optional at the wire level so that a missing or `null`
/// message can be reported as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Option<Vec<ConversationTurn>>,
}

impl ChatRequest {
    /// Convenience constructor used by tests and callers outside HTTP.
    pub fn new(message: impl Into<String>, history: Vec<ConversationTurn>) -> Self {
        Self {
            message: Some(message.into()),
            history: Some(history),
        }
    }
}

/// Successful `/chat` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

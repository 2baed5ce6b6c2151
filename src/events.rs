use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Role of a conversation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    Error,
}

/// A single entry in the conversation. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Error, text)
    }
}

/// What `submit` did with a piece of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended and no request was made
    Ignored(IgnoreReason),
    /// Answered locally by a canned reply, no remote call
    Answered,
    /// The remote request is in flight
    Dispatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IgnoreReason {
    #[strum(serialize = "empty input")]
    EmptyInput,
    #[strum(serialize = "request already pending")]
    RequestPending,
}

/// Outcome of one remote turn, sent from the request task to the controller
#[derive(Debug)]
pub(crate) struct TurnReply {
    pub generation: u64,
    pub prompt: String,
    pub result: Result<String, crate::error::RemoteError>,
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the conversation a message came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageOrigin(String);

impl MessageOrigin {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for MessageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat message that triggered a plugin command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    pub sender_name: String,
    pub message_str: String,
    pub unified_msg_origin: MessageOrigin,
}

impl MessageEvent {
    pub fn new(
        sender_name: impl Into<String>,
        message_str: impl Into<String>,
        unified_msg_origin: MessageOrigin,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            message_str: message_str.into(),
            unified_msg_origin,
        }
    }

    pub fn get_sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn plain_result(&self, text: impl Into<String>) -> MessageEventResult {
        MessageEventResult::Plain(text.into())
    }
}

/// A reply the host should send back to the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageEventResult {
    Plain(String),
}

impl MessageEventResult {
    pub fn text(&self) -> &str {
        match self {
            MessageEventResult::Plain(text) => text,
        }
    }
}

impl fmt::Display for MessageEventResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

use serde::{Deserialize, Serialize};

/// Completion returned by a provider's `text_chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LLMResponse {
    pub completion_text: String,
}

impl LLMResponse {
    pub fn new(completion_text: impl Into<String>) -> Self {
        Self {
            completion_text: completion_text.into(),
        }
    }
}

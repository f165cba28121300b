pub mod provider;
pub mod claude;
pub mod prompts;

pub use provider::LLMProvider;
pub use claude::ClaudeProvider;
pub use prompts::{AnalysisPrompt, DEFAULT_PERSONA_PROMPT};

pub mod config;
pub mod error;
pub mod models;
pub mod llm;
pub mod host;
pub mod plugin;

pub use config::{Config, PluginConfig};
pub use error::{Error, Result};
pub use host::{Context, PersonaManager, ProviderManager, StarContext, StaticPersonaManager};
pub use llm::{ClaudeProvider, LLMProvider};
pub use plugin::{CodeAnalyzer, CommandFilter, Star, StarMetadata};

pub mod code_analyzer;
pub mod command;

pub use code_analyzer::CodeAnalyzer;
pub use command::CommandFilter;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{MessageEvent, MessageEventResult};

/// Registration details a plugin publishes to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StarMetadata {
    pub name: String,
    pub author: String,
    pub description: String,
    pub version: String,
}

/// Lifecycle contract between the host and a plugin.
///
/// The host calls `initialize` once after construction, `handle` for every
/// message accepted by `command()`, possibly concurrently, and `terminate`
/// once when the plugin is unloaded. `handle` returns the replies in the order
/// they should be sent; failures are reported as replies, never as errors.
#[async_trait]
pub trait Star: Send + Sync {
    fn metadata(&self) -> &StarMetadata;

    fn command(&self) -> &CommandFilter;

    async fn initialize(&self) {}

    async fn handle(&self, event: &MessageEvent) -> Vec<MessageEventResult>;

    async fn terminate(&self) {}
}

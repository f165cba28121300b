use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PluginConfig;
use crate::host::Context;
use crate::llm::{AnalysisPrompt, LLMProvider, DEFAULT_PERSONA_PROMPT};
use crate::models::{MessageEvent, MessageEventResult, MessageOrigin};
use crate::plugin::{CommandFilter, Star, StarMetadata};

pub const COMMAND_NAME: &str = "代码分析";

pub const USAGE_MESSAGE: &str =
    "Please provide the code to analyze.\nUsage: /代码分析 <code> or 代码分析 <code>";
pub const NO_PROVIDER_MESSAGE: &str =
    "Sorry, no available LLM provider was found. Please check the configuration.";
pub const RESULT_HEADER: &str = "code analysis result:";
pub const FAILURE_PREFIX: &str = "Sorry, an error occurred during code analysis: ";

/// Answers `/代码分析 <code>` with an LLM-written analysis of the code.
pub struct CodeAnalyzer {
    context: Arc<dyn Context>,
    config: PluginConfig,
    metadata: StarMetadata,
    command: CommandFilter,
}

impl CodeAnalyzer {
    pub fn new(context: Arc<dyn Context>, config: Option<PluginConfig>) -> Self {
        let config = config.unwrap_or_default();
        tracing::info!("Code analyzer plugin config: {:?}", config);

        Self {
            context,
            config,
            metadata: StarMetadata {
                name: "code_analyzer".to_string(),
                author: "GCHkongcheng".to_string(),
                description: "A plugin that analyzes code".to_string(),
                version: "1.0.0".to_string(),
            },
            command: CommandFilter::new(COMMAND_NAME),
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub async fn code_analyzer(&self, event: &MessageEvent) -> Vec<MessageEventResult> {
        tracing::info!(
            "User {} requested code analysis: {}",
            event.get_sender_name(),
            event.message_str
        );

        let code_content = self.command.strip(&event.message_str);
        if code_content.is_empty() {
            return vec![event.plain_result(USAGE_MESSAGE)];
        }

        let Some(provider) = self.resolve_provider(&event.unified_msg_origin) else {
            tracing::error!("No available LLM provider found");
            return vec![event.plain_result(NO_PROVIDER_MESSAGE)];
        };

        let persona_prompt = if self.config.enable_personality {
            Some(self.resolve_persona(&event.unified_msg_origin).await)
        } else {
            None
        };

        let prompt = AnalysisPrompt::new(code_content, persona_prompt);
        tracing::debug!("Analysis prompt is ~{} tokens", prompt.estimate_tokens());

        tracing::info!("Calling LLM provider {} for code analysis", provider.id());
        match provider.text_chat(&prompt.to_prompt()).await {
            Ok(response) => {
                let analysis_result = response.completion_text.trim();
                tracing::info!(
                    "Code analysis finished, result length: {}",
                    analysis_result.chars().count()
                );
                vec![event.plain_result(format!("{}\n\n{}", RESULT_HEADER, analysis_result))]
            }
            Err(e) => {
                tracing::error!("LLM call for code analysis failed: {}", e);
                vec![event.plain_result(format!("{}{}", FAILURE_PREFIX, e))]
            }
        }
    }

    fn resolve_provider(&self, origin: &MessageOrigin) -> Option<Arc<dyn LLMProvider>> {
        let configured = self
            .config
            .llm_provider
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        match configured {
            Some(provider_id) => {
                tracing::info!("Using configured LLM provider: {}", provider_id);
                self.context.get_provider_by_id(provider_id)
            }
            None => {
                tracing::info!("Using the active LLM provider");
                self.context.get_using_provider(origin)
            }
        }
    }

    /// Never fails: lookup errors and missing personas fall back to the default prompt.
    async fn resolve_persona(&self, origin: &MessageOrigin) -> String {
        match self
            .context
            .persona_manager()
            .get_default_persona(origin)
            .await
        {
            Ok(Some(persona)) if !persona.prompt.trim().is_empty() => {
                let preview: String = persona.prompt.chars().take(50).collect();
                tracing::info!("Loaded persona {}, prompt: {}...", persona.name, preview);
                persona.prompt
            }
            Ok(_) => {
                tracing::warn!("No default persona for {}, using the default prompt", origin);
                DEFAULT_PERSONA_PROMPT.to_string()
            }
            Err(e) => {
                tracing::warn!("Failed to load default persona, using the default prompt: {}", e);
                DEFAULT_PERSONA_PROMPT.to_string()
            }
        }
    }
}

#[async_trait]
impl Star for CodeAnalyzer {
    fn metadata(&self) -> &StarMetadata {
        &self.metadata
    }

    fn command(&self) -> &CommandFilter {
        &self.command
    }

    async fn initialize(&self) {
        tracing::info!("Code analyzer plugin initialized");
    }

    async fn handle(&self, event: &MessageEvent) -> Vec<MessageEventResult> {
        self.code_analyzer(event).await
    }

    async fn terminate(&self) {
        tracing::info!("Code analyzer plugin terminated");
    }
}

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Settings the host hands to the plugin at construction time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PluginConfig {
    pub llm_provider: Option<String>,
    pub enable_personality: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            llm_provider: None,
            enable_personality: true,
        }
    }
}

impl PluginConfig {
    /// A missing or `null` mapping is the same as `{}`.
    pub fn from_value(value: Option<serde_json::Value>) -> Result<Self> {
        let mut config: Self = match value {
            None | Some(serde_json::Value::Null) => Self::default(),
            Some(v) => serde_json::from_value(v)?,
        };

        if config
            .llm_provider
            .as_deref()
            .map(|id| id.trim().is_empty())
            .unwrap_or(false)
        {
            config.llm_provider = None;
        }

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!("Invalid plugin config {}: {}", path.display(), e))
        })?;
        Self::from_value(Some(value))
    }

    pub fn with_llm_provider(mut self, id: impl Into<String>) -> Self {
        self.llm_provider = Some(id.into());
        self
    }

    pub fn with_personality(mut self, enabled: bool) -> Self {
        self.enable_personality = enabled;
        self
    }
}

/// Settings for the console host binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub model: Option<String>,
    pub provider_id: String,
    pub persona_prompt: Option<String>,
    pub plugin: PluginConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .map_err(|_| Error::Config("ANTHROPIC_API_KEY environment variable not set".to_string()))?;

        let model = env::var("CLAUDE_MODEL").ok().filter(|v| !v.is_empty());

        let provider_id = env::var("CODE_ANALYZER_PROVIDER_ID")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "claude".to_string());

        let persona_prompt = env::var("CODE_ANALYZER_PERSONA")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let llm_provider = env::var("CODE_ANALYZER_LLM_PROVIDER")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let enable_personality = env::var("CODE_ANALYZER_ENABLE_PERSONALITY")
            .ok()
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Ok(Self {
            anthropic_api_key,
            model,
            provider_id,
            persona_prompt,
            plugin: PluginConfig {
                llm_provider,
                enable_personality,
            },
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_config_uses_defaults() {
        let config = PluginConfig::from_value(None).unwrap();
        assert_eq!(config, PluginConfig::default());
        assert!(config.enable_personality);
        assert!(config.llm_provider.is_none());

        let config = PluginConfig::from_value(Some(serde_json::Value::Null)).unwrap();
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn test_partial_mapping() {
        let config = PluginConfig::from_value(Some(json!({ "llm_provider": "deepseek" }))).unwrap();
        assert_eq!(config.llm_provider.as_deref(), Some("deepseek"));
        assert!(config.enable_personality);

        let config =
            PluginConfig::from_value(Some(json!({ "enable_personality": false }))).unwrap();
        assert!(config.llm_provider.is_none());
        assert!(!config.enable_personality);
    }

    #[test]
    fn test_blank_provider_is_unset() {
        let config = PluginConfig::from_value(Some(json!({ "llm_provider": "  " }))).unwrap();
        assert!(config.llm_provider.is_none());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = PluginConfig::from_value(Some(json!({ "enable_personality": "maybe" })));
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_from_file() {
        let path = env::temp_dir().join(format!("codeanalyzer-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"llm_provider": "claude", "enable_personality": false}"#).unwrap();

        let config = PluginConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            config,
            PluginConfig::default()
                .with_llm_provider("claude")
                .with_personality(false)
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag(" off "));
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::llm::provider::LLMProvider;
use crate::models::LLMResponse;

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

pub struct ClaudeProvider {
    client: Client,
    id: String,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Serialize, Deserialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    error: Option<ClaudeError>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct ClaudeError {
    message: String,
}

impl ClaudeProvider {
    pub fn new(id: impl Into<String>, api_key: String, model: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            id: id.into(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn extract_text(response: ClaudeResponse) -> Result<String> {
        if let Some(error) = response.error {
            return Err(Error::LLMApi(error.message));
        }

        let text = response
            .content
            .into_iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(Error::LLMApi("Empty response from Claude".to_string()));
        }

        Ok(text)
    }
}

#[async_trait]
impl LLMProvider for ClaudeProvider {
    async fn text_chat(&self, prompt: &str) -> Result<LLMResponse> {
        tracing::debug!("Sending {} chars to Claude ({})", prompt.len(), self.model);

        let request_body = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: 4096,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LLMApi(format!(
                "Claude API error ({}): {}",
                status, body
            )));
        }

        let result: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to parse Claude response: {}", e)))?;

        Ok(LLMResponse::new(Self::extract_text(result)?))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ClaudeResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extract_joins_text_blocks() {
        let response = parse(
            r#"{"content": [
                {"type": "text", "text": "Language: "},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "Python"}
            ]}"#,
        );
        assert_eq!(ClaudeProvider::extract_text(response).unwrap(), "Language: Python");
    }

    #[test]
    fn test_extract_reports_api_error() {
        let response = parse(r#"{"error": {"type": "overloaded_error", "message": "Overloaded"}}"#);
        let err = ClaudeProvider::extract_text(response).unwrap_err();
        assert_eq!(err.to_string(), "LLM API error: Overloaded");
    }

    #[test]
    fn test_extract_rejects_empty_text() {
        let response = parse(r#"{"content": []}"#);
        assert!(matches!(
            ClaudeProvider::extract_text(response),
            Err(Error::LLMApi(_))
        ));
    }

    #[test]
    fn test_defaults_and_base_url() {
        let provider = ClaudeProvider::new("claude", "key".to_string(), None)
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(provider.id(), "claude");
        assert_eq!(provider.model(), DEFAULT_MODEL);
        assert_eq!(provider.base_url, "http://localhost:8080");
    }
}

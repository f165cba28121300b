use async_trait::async_trait;
use crate::error::Result;
use crate::models::LLMResponse;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn text_chat(&self, prompt: &str) -> Result<LLMResponse>;
    fn id(&self) -> &str;
    fn model(&self) -> &str;
}

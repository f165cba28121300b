use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::llm::LLMProvider;
use crate::models::MessageOrigin;

/// Registered providers plus which one each conversation is using.
#[derive(Default)]
pub struct ProviderManager {
    providers: HashMap<String, Arc<dyn LLMProvider>>,
    using_provider: Option<String>,
    session_providers: RwLock<HashMap<MessageOrigin, String>>,
}

impl ProviderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first registered provider becomes the default one in use.
    pub fn register(&mut self, provider: Arc<dyn LLMProvider>) {
        let id = provider.id().to_string();
        tracing::info!("Registered LLM provider {} ({})", id, provider.model());
        if self.using_provider.is_none() {
            self.using_provider = Some(id.clone());
        }
        self.providers.insert(id, provider);
    }

    /// Pin a conversation to a provider other than the default.
    pub fn set_session_provider(&self, origin: MessageOrigin, id: impl Into<String>) {
        self.session_providers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(origin, id.into());
    }

    pub fn get_provider_by_id(&self, id: &str) -> Option<Arc<dyn LLMProvider>> {
        self.providers.get(id).cloned()
    }

    pub fn get_using_provider(&self, origin: &MessageOrigin) -> Option<Arc<dyn LLMProvider>> {
        let session_id = self
            .session_providers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(origin)
            .cloned();

        session_id
            .or_else(|| self.using_provider.clone())
            .and_then(|id| self.get_provider_by_id(&id))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::error::Result;
    use crate::models::LLMResponse;

    struct NamedProvider(&'static str);

    #[async_trait]
    impl LLMProvider for NamedProvider {
        async fn text_chat(&self, _prompt: &str) -> Result<LLMResponse> {
            Ok(LLMResponse::new(self.0))
        }

        fn id(&self) -> &str {
            self.0
        }

        fn model(&self) -> &str {
            "test-model"
        }
    }

    fn manager() -> ProviderManager {
        let mut manager = ProviderManager::new();
        manager.register(Arc::new(NamedProvider("claude")));
        manager.register(Arc::new(NamedProvider("deepseek")));
        manager
    }

    #[test]
    fn test_lookup_by_id() {
        let manager = manager();
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.get_provider_by_id("deepseek").unwrap().id(), "deepseek");
        assert!(manager.get_provider_by_id("missing").is_none());
    }

    #[test]
    fn test_first_registered_is_using_provider() {
        let manager = manager();
        let origin = MessageOrigin::new("qq:GroupMessage:1");
        assert_eq!(manager.get_using_provider(&origin).unwrap().id(), "claude");
    }

    #[test]
    fn test_session_override() {
        let manager = manager();
        let pinned = MessageOrigin::new("qq:GroupMessage:1");
        let other = MessageOrigin::new("qq:GroupMessage:2");
        manager.set_session_provider(pinned.clone(), "deepseek");

        assert_eq!(manager.get_using_provider(&pinned).unwrap().id(), "deepseek");
        assert_eq!(manager.get_using_provider(&other).unwrap().id(), "claude");
    }

    #[test]
    fn test_session_pin_survives_poisoned_lock() {
        let manager = manager();
        let pinned = MessageOrigin::new("qq:GroupMessage:1");

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = manager.session_providers.write().unwrap();
            panic!("poison the session table");
        }));
        assert!(manager.session_providers.is_poisoned());

        manager.set_session_provider(pinned.clone(), "deepseek");
        assert_eq!(manager.get_using_provider(&pinned).unwrap().id(), "deepseek");
    }

    #[test]
    fn test_empty_manager_resolves_nothing() {
        let manager = ProviderManager::new();
        assert!(manager.is_empty());
        assert!(manager
            .get_using_provider(&MessageOrigin::new("console"))
            .is_none());
    }
}

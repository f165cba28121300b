use std::sync::Arc;

use crate::host::persona::PersonaManager;
use crate::host::provider_manager::ProviderManager;
use crate::llm::LLMProvider;
use crate::models::MessageOrigin;

/// What the host exposes to a plugin. Provider lookups signal absence with `None`.
pub trait Context: Send + Sync {
    fn get_provider_by_id(&self, id: &str) -> Option<Arc<dyn LLMProvider>>;
    fn get_using_provider(&self, origin: &MessageOrigin) -> Option<Arc<dyn LLMProvider>>;
    fn persona_manager(&self) -> &dyn PersonaManager;
}

pub struct StarContext {
    providers: ProviderManager,
    persona_manager: Box<dyn PersonaManager>,
}

impl StarContext {
    pub fn new(providers: ProviderManager, persona_manager: impl PersonaManager + 'static) -> Self {
        Self {
            providers,
            persona_manager: Box::new(persona_manager),
        }
    }
}

impl Context for StarContext {
    fn get_provider_by_id(&self, id: &str) -> Option<Arc<dyn LLMProvider>> {
        self.providers.get_provider_by_id(id)
    }

    fn get_using_provider(&self, origin: &MessageOrigin) -> Option<Arc<dyn LLMProvider>> {
        self.providers.get_using_provider(origin)
    }

    fn persona_manager(&self) -> &dyn PersonaManager {
        self.persona_manager.as_ref()
    }
}

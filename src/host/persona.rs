use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;
use crate::models::{MessageOrigin, Persona};

#[async_trait]
pub trait PersonaManager: Send + Sync {
    /// `Ok(None)` when the conversation has no persona configured.
    async fn get_default_persona(&self, origin: &MessageOrigin) -> Result<Option<Persona>>;
}

/// Persona table fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticPersonaManager {
    default_persona: Option<Persona>,
    session_personas: HashMap<MessageOrigin, Persona>,
}

impl StaticPersonaManager {
    pub fn new(default_persona: Option<Persona>) -> Self {
        Self {
            default_persona,
            session_personas: HashMap::new(),
        }
    }

    pub fn with_session_persona(mut self, origin: MessageOrigin, persona: Persona) -> Self {
        self.session_personas.insert(origin, persona);
        self
    }
}

#[async_trait]
impl PersonaManager for StaticPersonaManager {
    async fn get_default_persona(&self, origin: &MessageOrigin) -> Result<Option<Persona>> {
        Ok(self
            .session_personas
            .get(origin)
            .or(self.default_persona.as_ref())
            .cloned())
    }
}

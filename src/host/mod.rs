pub mod context;
pub mod persona;
pub mod provider_manager;

pub use context::{Context, StarContext};
pub use persona::{PersonaManager, StaticPersonaManager};
pub use provider_manager::ProviderManager;

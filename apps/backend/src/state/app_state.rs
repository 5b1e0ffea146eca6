use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::registry::SessionRegistry;
use crate::resources::LineStore;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// The process-wide session registry
    pub registry: Arc<SessionRegistry>,
    /// Round templates loaded at startup
    pub templates: Arc<LineStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(registry: Arc<SessionRegistry>, templates: Arc<LineStore>, config: AppConfig) -> Self {
        Self {
            registry,
            templates,
            config,
        }
    }

    /// Fresh registry, the given templates and default configuration (for testing)
    pub fn for_tests(templates: LineStore) -> Self {
        Self::new(
            Arc::new(SessionRegistry::new()),
            Arc::new(templates),
            AppConfig::default(),
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.registry.len())
            .field("templates", &self.templates.len())
            .field("config", &self.config)
            .finish()
    }
}

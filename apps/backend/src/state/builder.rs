use std::sync::Arc;

use tracing::warn;

use crate::config::AppConfig;
use crate::domain::registry::SessionRegistry;
use crate::domain::RandomSource;
use crate::error::AppError;
use crate::resources::LineStore;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: AppConfig,
    templates: Option<LineStore>,
    random_source: Option<Arc<dyn RandomSource>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            templates: None,
            random_source: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use these templates instead of reading `config.res_path`.
    pub fn with_templates(mut self, templates: LineStore) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_random_source(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.random_source = Some(rng);
        self
    }

    /// Build the state. A template file that cannot be read is logged and
    /// replaced by an empty store; round requests then report the templates
    /// as unavailable.
    pub fn build(self) -> Result<AppState, AppError> {
        let templates = match self.templates {
            Some(t) => t,
            None => LineStore::load(&self.config.res_path).unwrap_or_else(|e| {
                warn!(error = %e, "starting without round templates");
                LineStore::default()
            }),
        };

        let registry = match self.random_source {
            Some(rng) => SessionRegistry::with_random_source(rng),
            None => SessionRegistry::new(),
        };

        Ok(AppState::new(
            Arc::new(registry),
            Arc::new(templates),
            self.config,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

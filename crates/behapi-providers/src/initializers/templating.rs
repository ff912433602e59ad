//! Templating-aware initializer

use std::sync::Arc;

use behapi_domain::error::Result;
use behapi_domain::ports::{ContextInitializer, TemplateEngine};
use behapi_domain::value_objects::ScenarioContext;

/// Attaches the template engine
pub struct TemplatingInitializer {
    engine: Arc<dyn TemplateEngine>,
}

impl TemplatingInitializer {
    /// Create the initializer
    pub fn new(engine: Arc<dyn TemplateEngine>) -> Self {
        Self { engine }
    }
}

impl ContextInitializer for TemplatingInitializer {
    fn initialize_context(&self, context: &mut ScenarioContext) -> Result<()> {
        context.attach(self.engine.clone());
        Ok(())
    }
}

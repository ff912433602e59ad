//! Key-value-aware initializer

use std::sync::Arc;

use behapi_domain::error::Result;
use behapi_domain::ports::{ContextInitializer, KeyValueClient};
use behapi_domain::value_objects::ScenarioContext;

/// Attaches the key-value client
pub struct KeyValueInitializer {
    client: Arc<dyn KeyValueClient>,
}

impl KeyValueInitializer {
    /// Create the initializer
    pub fn new(client: Arc<dyn KeyValueClient>) -> Self {
        Self { client }
    }
}

impl ContextInitializer for KeyValueInitializer {
    fn initialize_context(&self, context: &mut ScenarioContext) -> Result<()> {
        context.attach(self.client.clone());
        Ok(())
    }
}

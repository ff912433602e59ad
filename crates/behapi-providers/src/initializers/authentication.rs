//! Authentication initializer

use std::sync::Arc;

use behapi_domain::error::Result;
use behapi_domain::ports::ContextInitializer;
use behapi_domain::value_objects::{AppCredentials, ScenarioContext};

/// Attaches the application credentials
pub struct AuthenticationInitializer {
    credentials: Arc<AppCredentials>,
}

impl AuthenticationInitializer {
    /// Create the initializer for the application `id` / `secret`
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credentials: Arc::new(AppCredentials::new(id, secret)),
        }
    }
}

impl ContextInitializer for AuthenticationInitializer {
    fn initialize_context(&self, context: &mut ScenarioContext) -> Result<()> {
        context.attach(self.credentials.clone());
        Ok(())
    }
}

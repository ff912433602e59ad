//! HTTP-aware initializer

use std::sync::Arc;

use behapi_domain::error::Result;
use behapi_domain::ports::{ContextInitializer, HttpClient};
use behapi_domain::value_objects::ScenarioContext;

use crate::http::HistoryRecorder;

/// Attaches the HTTP client and its history
pub struct HttpInitializer {
    client: Arc<dyn HttpClient>,
    history: Arc<HistoryRecorder>,
}

impl HttpInitializer {
    /// Create the initializer
    pub fn new(client: Arc<dyn HttpClient>, history: Arc<HistoryRecorder>) -> Self {
        Self { client, history }
    }
}

impl ContextInitializer for HttpInitializer {
    fn initialize_context(&self, context: &mut ScenarioContext) -> Result<()> {
        context.attach(self.client.clone());
        context.attach(self.history.clone());
        Ok(())
    }
}

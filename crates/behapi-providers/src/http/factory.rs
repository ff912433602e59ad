//! HTTP client factory
//!
//! The client is not constructed directly: subscribers are first added to
//! the factory, then `build_client` produces a client notifying all of them.

use std::sync::{Arc, RwLock};

use behapi_domain::error::{Error, Result};
use behapi_domain::ports::RequestSubscriber;
use tracing::debug;

use super::client::{HttpClientOptions, ReqwestHttpClient};

/// Builds HTTP clients wired to the registered subscribers
#[derive(Default)]
pub struct HttpClientFactory {
    subscribers: RwLock<Vec<Arc<dyn RequestSubscriber>>>,
}

impl HttpClientFactory {
    /// Create a factory without subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber to every client built afterwards
    pub fn add_subscriber(&self, subscriber: Arc<dyn RequestSubscriber>) -> Result<()> {
        let mut subscribers = self
            .subscribers
            .write()
            .map_err(|_| Error::infrastructure("HTTP factory lock poisoned"))?;
        subscribers.push(subscriber);
        debug!(count = subscribers.len(), "Subscriber added to HTTP client factory");
        Ok(())
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Build a client for `options`
    pub fn build_client(&self, options: &HttpClientOptions) -> Result<ReqwestHttpClient> {
        let subscribers = self
            .subscribers
            .read()
            .map_err(|_| Error::infrastructure("HTTP factory lock poisoned"))?
            .clone();
        ReqwestHttpClient::new(options, subscribers)
    }
}

impl std::fmt::Debug for HttpClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientFactory")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

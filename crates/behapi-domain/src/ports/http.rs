//! HTTP client port

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{HttpExchange, HttpRequest, HttpResponse};

/// HTTP client used by scenario steps
///
/// Implementations never turn an error status into an `Err`: a 4xx or 5xx
/// response is a regular response for an API test.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Base URL relative requests are resolved against
    fn base_url(&self) -> &str;

    /// Send `request` and return the response, whatever its status
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Observer notified of every completed exchange
pub trait RequestSubscriber: Send + Sync {
    /// Called once per exchange, after the response was received
    fn on_exchange(&self, exchange: &HttpExchange);
}

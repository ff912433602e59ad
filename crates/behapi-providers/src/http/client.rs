//! reqwest-backed HTTP client
//!
//! Relative URLs are resolved against the configured base URL, redirects
//! are never followed and error statuses are returned as plain responses,
//! so that scenarios can assert on exactly what the API answered.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use behapi_domain::error::{Error, Result};
use behapi_domain::ports::{HttpClient, RequestSubscriber};
use behapi_domain::value_objects::{HttpExchange, HttpRequest, HttpResponse};
use reqwest::{Client, Method, redirect::Policy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options used when building a [`ReqwestHttpClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientOptions {
    /// Base URL of the tested API
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Total timeout of a request
    pub timeout: Duration,
    /// Follow redirects instead of returning the 3xx response
    pub allow_redirects: bool,
}

impl HttpClientOptions {
    /// Options for `base_url` with redirects disabled
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: format!("behapi/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            allow_redirects: false,
        }
    }
}

/// HTTP client notifying its subscribers of every exchange
pub struct ReqwestHttpClient {
    base_url: String,
    client: Client,
    subscribers: Vec<Arc<dyn RequestSubscriber>>,
}

impl ReqwestHttpClient {
    /// Build a client; prefer going through `HttpClientFactory`
    pub fn new(
        options: &HttpClientOptions,
        subscribers: Vec<Arc<dyn RequestSubscriber>>,
    ) -> Result<Self> {
        let redirect = if options.allow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .redirect(redirect)
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::Http {
                message: format!("Failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            base_url: options.base_url.clone(),
            client,
            subscribers,
        })
    }

    /// Number of subscribers notified per exchange
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for ReqwestHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestHttpClient")
            .field("base_url", &self.base_url)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

/// Resolve `url` against `base_url` unless it is already absolute
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    let base = base_url.trim_end_matches('/');
    let path = url.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = resolve_url(&self.base_url, &request.url);
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::http(format!("Invalid HTTP method '{}'", request.method)))?;

        debug!(method = %method, url = %url, "Sending request");

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| Error::Http {
            message: format!("Request to {url} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await.map_err(|e| Error::Http {
            message: format!("Failed to read response body from {url}: {e}"),
            source: Some(Box::new(e)),
        })?;

        let response = HttpResponse {
            status,
            headers,
            body,
        };
        let exchange = HttpExchange {
            request: HttpRequest { url, ..request },
            response: response.clone(),
        };
        for subscriber in &self.subscribers {
            subscriber.on_exchange(&exchange);
        }

        Ok(response)
    }
}

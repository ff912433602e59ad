//! Request history
//!
//! Bounded record of the last exchanges performed by the HTTP client. Steps
//! assert on the last response through it, and the debug reporter renders
//! it. It is a bag: the history is emptied once a scenario finished.

use std::collections::VecDeque;
use std::sync::Mutex;

use behapi_domain::error::{Error, Result};
use behapi_domain::ports::{RequestSubscriber, ResettableBag};
use behapi_domain::value_objects::HttpExchange;
use tracing::warn;

/// Keeps the last `limit` exchanges, oldest first
#[derive(Debug)]
pub struct HistoryRecorder {
    limit: usize,
    exchanges: Mutex<VecDeque<HttpExchange>>,
}

impl HistoryRecorder {
    /// Create a recorder keeping at most `limit` exchanges (at least one)
    ///
    /// Storage grows with the recorded exchanges, not with `limit`.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            exchanges: Mutex::new(VecDeque::new()),
        }
    }

    /// Maximum number of exchanges kept
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record an exchange, evicting the oldest ones beyond the limit
    pub fn record(&self, exchange: HttpExchange) {
        match self.exchanges.lock() {
            Ok(mut exchanges) => {
                exchanges.push_back(exchange);
                while exchanges.len() > self.limit {
                    exchanges.pop_front();
                }
            }
            Err(_) => warn!("History lock poisoned, exchange dropped"),
        }
    }

    /// Most recent exchange
    pub fn last(&self) -> Option<HttpExchange> {
        self.exchanges
            .lock()
            .ok()
            .and_then(|exchanges| exchanges.back().cloned())
    }

    /// Every kept exchange, oldest first
    pub fn all(&self) -> Vec<HttpExchange> {
        self.exchanges
            .lock()
            .map(|exchanges| exchanges.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of kept exchanges
    pub fn len(&self) -> usize {
        self.exchanges.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether nothing was recorded since the last reset
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RequestSubscriber for HistoryRecorder {
    fn on_exchange(&self, exchange: &HttpExchange) {
        self.record(exchange.clone());
    }
}

impl ResettableBag for HistoryRecorder {
    fn reset(&self) -> Result<()> {
        self.exchanges
            .lock()
            .map(|mut exchanges| exchanges.clear())
            .map_err(|_| Error::infrastructure("History lock poisoned"))
    }
}

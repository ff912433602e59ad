//! Per-service configuration sections

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// `[http]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Number of exchanges kept by the request history
    pub history_limit: usize,

    /// User agent override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            user_agent: None,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// `[kv]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KvConfig {
    /// Connection URL of the key-value store
    pub url: String,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_KV_URL.to_string(),
        }
    }
}

//! Redis key-value client
//!
//! Key-value client backed by Redis. Building the client only validates the
//! connection URL; the first command opens a multiplexed connection.
//!
//! ## Example
//!
//! ```ignore
//! use behapi_providers::kv::RedisKeyValueClient;
//!
//! let client = RedisKeyValueClient::new("redis://127.0.0.1:6379")?;
//! client.set("session", "abc").await?;
//! ```

use async_trait::async_trait;
use behapi_domain::error::{Error, Result};
use behapi_domain::ports::KeyValueClient;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use tracing::debug;

/// Redis key-value client
#[derive(Clone)]
pub struct RedisKeyValueClient {
    client: Client,
    url: String,
}

impl RedisKeyValueClient {
    /// Create a client for `url` (e.g. `redis://127.0.0.1:6379`)
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| Error::KeyValue {
            message: format!("Failed to create Redis client for '{url}': {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::KeyValue {
                message: format!("Failed to get Redis connection: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

impl std::fmt::Debug for RedisKeyValueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKeyValueClient")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KeyValueClient for RedisKeyValueClient {
    fn endpoint(&self) -> String {
        self.url.clone()
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        debug!(key, "Redis GET");

        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| Error::KeyValue {
                message: format!("Redis GET failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        debug!(key, "Redis SET");

        let result: redis::RedisResult<()> = conn.set(key, value).await;
        result.map_err(|e| Error::KeyValue {
            message: format!("Redis SET failed: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        debug!(key, "Redis DEL");

        let deleted: redis::RedisResult<i32> = conn.del(key).await;
        match deleted {
            Ok(count) => Ok(count > 0),
            Err(e) => Err(Error::KeyValue {
                message: format!("Redis DEL failed: {e}"),
                source: Some(Box::new(e)),
            }),
        }
    }
}

//! Key-value store port

use async_trait::async_trait;

use crate::error::Result;

/// Client of the key-value store shared with the tested application
#[async_trait]
pub trait KeyValueClient: Send + Sync {
    /// Connection endpoint, for diagnostics
    fn endpoint(&self) -> String;

    /// Read a key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;
}

//! Key-value store clients

pub mod redis;

pub use self::redis::RedisKeyValueClient;

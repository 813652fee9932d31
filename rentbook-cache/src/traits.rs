//! Cache store trait definition.

use crate::error::CacheResult;
use async_trait::async_trait;
use std::time::Duration;

/// Cache store trait for different cache backends.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a JSON value from the cache.
    ///
    /// Returns `Ok(None)` if the key is absent or expired.
    async fn get_json(&self, key: &str) -> CacheResult<Option<String>>;

    /// Set a JSON value in the cache, optionally expiring after `ttl`.
    async fn set_json(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Check if a key exists in the cache.
    async fn exists(&self, key: &str) -> CacheResult<bool> {
        Ok(self.get_json(key).await?.is_some())
    }

    /// Clear all keys from the cache.
    async fn clear(&self) -> CacheResult<()>;

    /// Delete several keys.
    async fn delete_many(&self, keys: &[&str]) -> CacheResult<()> {
        for key in keys {
            self.delete(key).await?;
        }
        Ok(())
    }
}

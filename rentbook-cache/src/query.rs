//! Query cache keyed by resource, with explicit invalidation

use crate::error::{CacheError, CacheResult};
use crate::memory::InMemoryCache;
use crate::resource::{QueryKey, Resource, ResourceChanged};
use crate::traits::CacheStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, mpsc};

/// Caches successful query results and drops them when their resource is
/// invalidated.
///
/// Each resource keeps the set of keys stored under it and a list of
/// subscribers that receive a [`ResourceChanged`] message on invalidation.
pub struct QueryCache<C: CacheStore = InMemoryCache> {
    /// Underlying cache store
    cache: Arc<C>,

    /// Resource to stored keys
    keys: Arc<RwLock<HashMap<Resource, HashSet<String>>>>,

    /// Resource to subscriber channels
    subscribers: Arc<RwLock<HashMap<Resource, Vec<mpsc::UnboundedSender<ResourceChanged>>>>>,

    /// Optional expiry for stored results
    ttl: Option<Duration>,
}

impl QueryCache<InMemoryCache> {
    /// Query cache over a fresh [`InMemoryCache`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCache::new()))
    }
}

impl<C: CacheStore> QueryCache<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self {
            cache,
            keys: Arc::new(RwLock::new(HashMap::new())),
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            ttl: None,
        }
    }

    /// Expire stored results after `ttl` even without invalidation.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Cached value for `key`, if any.
    ///
    /// An entry that no longer deserializes as `T` is treated as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> CacheResult<Option<T>> {
        if !key.resource().is_cacheable() {
            return Ok(None);
        }
        let Some(raw) = self.cache.get_json(&key.to_string()).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                rentbook_log::debug!("Discarding cached {} that failed to decode: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Store `value` under `key`. Non-cacheable resources are ignored.
    pub async fn put<T: Serialize + ?Sized>(&self, key: &QueryKey, value: &T) -> CacheResult<()> {
        let resource = key.resource();
        if !resource.is_cacheable() {
            return Ok(());
        }

        let raw =
            serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        let key = key.to_string();
        self.cache.set_json(&key, raw, self.ttl).await?;
        self.keys.write().await.entry(resource).or_default().insert(key);
        Ok(())
    }

    /// Whether `key` currently has a cached value.
    pub async fn contains(&self, key: &QueryKey) -> CacheResult<bool> {
        if !key.resource().is_cacheable() {
            return Ok(false);
        }
        self.cache.exists(&key.to_string()).await
    }

    /// Return the cached value or run `load` and cache its success.
    ///
    /// Failures are returned as-is and leave the cache untouched.
    pub async fn fetch<T, E, F, Fut>(&self, key: &QueryKey, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key).await? {
            rentbook_log::trace!("Cache hit {}", key);
            return Ok(hit);
        }

        rentbook_log::trace!("Cache miss {}", key);
        let value = load().await?;
        self.put(key, &value).await?;
        Ok(value)
    }

    /// Drop every query stored under each resource and notify subscribers.
    pub async fn invalidate(&self, resources: &[Resource]) -> CacheResult<()> {
        for resource in resources {
            self.invalidate_one(*resource).await?;
        }
        Ok(())
    }

    async fn invalidate_one(&self, resource: Resource) -> CacheResult<()> {
        let removed = self.keys.write().await.remove(&resource);
        if let Some(keys) = removed {
            let key_refs: Vec<&str> = keys.iter().map(|s| s.as_str()).collect();
            self.cache.delete_many(&key_refs).await?;
            rentbook_log::debug!("Invalidated {} ({} queries)", resource, keys.len());
        }

        let mut subscribers = self.subscribers.write().await;
        if let Some(list) = subscribers.get_mut(&resource) {
            list.retain(|tx| tx.send(ResourceChanged { resource }).is_ok());
            if list.is_empty() {
                subscribers.remove(&resource);
            }
        }
        Ok(())
    }

    /// Receive a [`ResourceChanged`] each time `resource` is invalidated.
    pub async fn subscribe(&self, resource: Resource) -> mpsc::UnboundedReceiver<ResourceChanged> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .write()
            .await
            .entry(resource)
            .or_default()
            .push(tx);
        rx
    }

    /// Keys currently tracked for `resource`.
    pub async fn keys_for(&self, resource: Resource) -> Vec<String> {
        self.keys
            .read()
            .await
            .get(&resource)
            .map(|keys| {
                let mut keys: Vec<String> = keys.iter().cloned().collect();
                keys.sort();
                keys
            })
            .unwrap_or_default()
    }

    /// Forget everything. Subscribers are kept and not notified.
    pub async fn clear(&self) -> CacheResult<()> {
        self.cache.clear().await?;
        self.keys.write().await.clear();
        Ok(())
    }
}

impl<C: CacheStore> Clone for QueryCache<C> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            keys: self.keys.clone(),
            subscribers: self.subscribers.clone(),
            ttl: self.ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get() {
        let cache = QueryCache::in_memory();
        let key = QueryKey::new(Resource::Listings);

        cache.put(&key, &vec!["a", "b"]).await.unwrap();
        let hit: Option<Vec<String>> = cache.get(&key).await.unwrap();
        assert_eq!(hit, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn test_invalidate_drops_all_params() {
        let cache = QueryCache::in_memory();
        let pending = QueryKey::with_params(Resource::Bookings, [("status", "pending")]);
        let all = QueryKey::new(Resource::Bookings);
        let listings = QueryKey::new(Resource::Listings);

        cache.put(&pending, &1).await.unwrap();
        cache.put(&all, &2).await.unwrap();
        cache.put(&listings, &3).await.unwrap();
        assert_eq!(cache.keys_for(Resource::Bookings).await.len(), 2);

        cache.invalidate(&[Resource::Bookings]).await.unwrap();
        assert!(!cache.contains(&pending).await.unwrap());
        assert!(!cache.contains(&all).await.unwrap());
        assert!(cache.contains(&listings).await.unwrap());
    }

    #[tokio::test]
    async fn test_availability_never_cached() {
        let cache = QueryCache::in_memory();
        let key = QueryKey::with_params(Resource::Availability, [("room_id", "1")]);
        cache.put(&key, &true).await.unwrap();
        assert!(!cache.contains(&key).await.unwrap());
        assert!(cache.keys_for(Resource::Availability).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_caches_success_only() {
        let cache = QueryCache::in_memory();
        let key = QueryKey::new(Resource::Health);

        let failed: Result<u32, CacheError> =
            cache.fetch(&key, || async { Err(CacheError::Other("down".into())) }).await;
        assert!(failed.is_err());
        assert!(!cache.contains(&key).await.unwrap());

        let loaded: Result<u32, CacheError> = cache.fetch(&key, || async { Ok(7) }).await;
        assert_eq!(loaded.unwrap(), 7);

        let cached: Result<u32, CacheError> = cache.fetch(&key, || async { Ok(8) }).await;
        assert_eq!(cached.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_subscribers_notified() {
        let cache = QueryCache::in_memory();
        let mut rx = cache.subscribe(Resource::MyBookings).await;
        let mut other = cache.subscribe(Resource::Listings).await;

        cache.invalidate(&[Resource::MyBookings]).await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(ResourceChanged {
                resource: Resource::MyBookings
            })
        );
        assert!(other.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_subscribers_pruned() {
        let cache = QueryCache::in_memory();
        let rx = cache.subscribe(Resource::Listings).await;
        drop(rx);

        cache.invalidate(&[Resource::Listings]).await.unwrap();
        assert!(cache.subscribers.read().await.is_empty());
    }
}

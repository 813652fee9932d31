//! Query caching for the rentbook client.
//!
//! Reads are stored under a [`QueryKey`] (a [`Resource`] plus its filter
//! parameters). Writes never touch cached data; they invalidate whole
//! resource families so the next read goes back to the server, and anyone
//! subscribed to the family is told through a [`ResourceChanged`] message.
//!
//! # Examples
//!
//! ```
//! use rentbook_cache::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> CacheResult<()> {
//! let cache = QueryCache::in_memory();
//! let key = QueryKey::new(Resource::Listings);
//! let mut changes = cache.subscribe(Resource::Listings).await;
//!
//! cache.put(&key, &vec!["MacBook"]).await?;
//! assert!(cache.contains(&key).await?);
//!
//! cache.invalidate(&[Resource::Listings]).await?;
//! assert!(!cache.contains(&key).await?);
//! assert_eq!(changes.recv().await.map(|c| c.resource), Some(Resource::Listings));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod query;
pub mod resource;
pub mod traits;

pub use error::{CacheError, CacheResult};
pub use memory::InMemoryCache;
pub use query::QueryCache;
pub use resource::{QueryKey, Resource, ResourceChanged};
pub use traits::CacheStore;

//! Cache layer
//!
//! In-process caching for hot list reads (news list, category list), backed by
//! moka. Services invalidate their keys on every write.
//!
//! # Usage
//!
//! ```rust,ignore
//! use newsdesk::cache::{create_cache, CacheLayer};
//! use newsdesk::config::CacheConfig;
//!
//! let cache = create_cache(&CacheConfig::default());
//! cache.set("key", &"value", Duration::from_secs(60)).await?;
//! ```

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;

pub use memory::MemoryCache;

/// Cache layer trait
///
/// The generic methods make this trait unusable as `dyn CacheLayer`;
/// services hold the concrete cache type instead.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// Set a value in cache with TTL
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()>;

    /// Delete a value from cache
    async fn delete(&self, key: &str) -> Result<()>;

    /// Delete all values matching a glob pattern
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;
}

/// Shared cache handle
pub type Cache = MemoryCache;

/// Create a cache instance based on configuration
pub fn create_cache(config: &CacheConfig) -> Arc<Cache> {
    let ttl = Duration::from_secs(config.ttl_seconds);
    Arc::new(MemoryCache::with_capacity_and_ttl(config.max_capacity, ttl))
}

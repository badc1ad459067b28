//! In-memory cache implementation using moka
//!
//! Provides a fast, thread-safe in-memory cache with TTL support.
//!
//! # Features
//! - Per-entry TTL, capped by the cache-wide default
//! - Glob-style pattern matching for bulk deletion
//! - Thread-safe concurrent access

use super::CacheLayer;
use anyhow::{Context, Result};
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default maximum cache capacity (number of entries)
const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Default TTL for cache entries (5 minutes)
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cache entry wrapper that stores serialized JSON data
#[derive(Clone)]
struct CacheEntry {
    data: Arc<String>,
    ttl: Duration,
}

impl CacheEntry {
    fn new<T: Serialize>(value: &T, ttl: Duration) -> Result<Self> {
        let json = serde_json::to_string(value).context("Failed to serialize cache value")?;
        Ok(Self {
            data: Arc::new(json),
            ttl,
        })
    }

    fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.data).context("Failed to deserialize cache value")
    }
}

/// Expires each entry after its own TTL
struct EntryExpiry;

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory cache using moka
///
/// Values are stored as JSON strings so any serializable type can be cached.
pub struct MemoryCache {
    cache: Cache<String, CacheEntry>,
    default_ttl: Duration,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.cache.entry_count())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl MemoryCache {
    /// Create a new memory cache with default settings
    pub fn new() -> Self {
        Self::with_capacity_and_ttl(DEFAULT_MAX_CAPACITY, DEFAULT_TTL)
    }

    /// Create a new memory cache with custom capacity and default TTL
    ///
    /// The default TTL is also the upper bound for per-entry TTLs.
    pub fn with_capacity_and_ttl(max_capacity: u64, default_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self { cache, default_ttl }
    }

    /// Get the default TTL for this cache
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Check if a pattern matches a key using glob-style matching
    ///
    /// `*` matches any sequence of characters, `?` matches exactly one.
    fn pattern_matches(pattern: &str, key: &str) -> bool {
        let pattern_chars: Vec<char> = pattern.chars().collect();
        let key_chars: Vec<char> = key.chars().collect();
        Self::glob_match(&pattern_chars, &key_chars, 0, 0)
    }

    fn glob_match(pattern: &[char], key: &[char], pi: usize, ki: usize) -> bool {
        if pi == pattern.len() {
            return ki == key.len();
        }

        match pattern[pi] {
            '*' => {
                Self::glob_match(pattern, key, pi + 1, ki)
                    || (ki < key.len() && Self::glob_match(pattern, key, pi, ki + 1))
            }
            '?' => ki < key.len() && Self::glob_match(pattern, key, pi + 1, ki + 1),
            p => ki < key.len() && key[ki] == p && Self::glob_match(pattern, key, pi + 1, ki + 1),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheLayer for MemoryCache {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.cache.get(key).await {
            Some(entry) => Ok(Some(entry.deserialize()?)),
            None => Ok(None),
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let entry = CacheEntry::new(value, ttl.min(self.default_ttl))?;
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        // Full scan; the key space here is a handful of list keys.
        let keys_to_delete: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| Self::pattern_matches(pattern, key.as_ref()))
            .map(|(key, _)| (*key).clone())
            .collect();

        for key in keys_to_delete {
            self.cache.invalidate(&key).await;
        }

        Ok(())
    }
}

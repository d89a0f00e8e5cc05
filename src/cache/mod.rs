//! Query-keyed result memoization (TTL + LRU bound).
//!
//! Keys are the raw query text — case-sensitive and unnormalized; callers
//! that want case-insensitive sharing normalize before keying. Expiry is
//! evaluated lazily at read time; the LRU capacity bounds growth under high
//! query cardinality. Entries are replaced wholesale, never mutated in place.


use std::time::{Duration, Instant};

use moka::Expiry;
use moka::sync::Cache;

use crate::constants::DEFAULT_CACHE_CAPACITY;

#[derive(Debug, Clone)]
struct Stored<T> {
    value: T,
    ttl: Duration,
}

struct PerEntryTtl;

impl<T> Expiry<String, Stored<T>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Stored<T>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Stored<T>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Memoizes `query text -> T` for a bounded time-to-live.
///
/// One instance per value kind: the engine keeps independent caches for
/// ranked results and for suggestions.
pub struct ResultCache<T: Clone + Send + Sync + 'static> {
    entries: Cache<String, Stored<T>>,
}

impl<T: Clone + Send + Sync + 'static> ResultCache<T> {
    /// Creates a cache with the default LRU capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries (LRU eviction on
    /// top of TTL expiry).
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }

    /// Returns the unexpired value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<T> {
        self.entries.get(key).map(|stored| stored.value)
    }

    /// Stores `value` under `key` with a per-entry TTL, replacing any
    /// previous entry wholesale.
    pub fn insert(&self, key: &str, value: T, ttl: Duration) {
        self.entries.insert(key.to_string(), Stored { value, ttl });
    }

    /// Returns the cached value for `key`, or invokes `compute`, stores the
    /// result with `ttl`, and returns it.
    ///
    /// On a hit `compute` is not invoked. Concurrent callers for the same
    /// missing key are coalesced; `compute` runs once.
    pub fn get_or_compute(&self, key: &str, ttl: Duration, compute: impl FnOnce() -> T) -> T {
        self.entries
            .entry(key.to_string())
            .or_insert_with(|| Stored {
                value: compute(),
                ttl,
            })
            .into_value()
            .value
    }

    /// Removes the entry for `key`, if present.
    pub fn invalidate(&self, key: &str) {
        self.entries.invalidate(key);
    }

    /// Returns `true` if an unexpired entry exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of cached entries (may include entries pending
    /// eviction until maintenance runs).
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ResultCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> std::fmt::Debug for ResultCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

//! The unified cache contract: construction, and dispatch to whichever
//! eviction engine was selected.

use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::config::{CacheConfig, EvictionPolicy};
use crate::error::Result;
use crate::lfu::LfuEngine;
use crate::lru::LruEngine;

/// A point-in-time snapshot of a cache's occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheInfo {
    /// Number of live items.
    pub size: usize,
    /// Maximum items before eviction kicks in; `0` means unbounded.
    pub capacity: usize,
}

enum Engine<V> {
    Lru(LruEngine<V>),
    Lfu(LfuEngine<V>),
}

/// A bounded key/value store with pluggable eviction and per-item TTL.
///
/// Every operation (including `get`) takes the engine's exclusive lock: a
/// cache hit always mutates the ordering structure (move-to-front for LRU,
/// bucket promotion for LFU), so there is no read-only fast path. `Info` is
/// the one operation that only needs a shared lock.
pub struct Cache<V> {
    inner: RwLock<Engine<V>>,
    default_ttl: Option<Duration>,
}

impl<V: Clone> Cache<V> {
    /// Builds a cache running `policy`, bounded by `config.capacity` items
    /// (`0` = unbounded) with `config.default_ttl` applied to any `Set`
    /// that doesn't specify its own TTL.
    pub fn new(policy: EvictionPolicy, config: CacheConfig) -> Self {
        let engine = match policy {
            EvictionPolicy::Lru => Engine::Lru(LruEngine::new(config.capacity, config.default_ttl)),
            EvictionPolicy::Lfu => Engine::Lfu(LfuEngine::new(config.capacity, config.default_ttl)),
        };
        Cache {
            inner: RwLock::new(engine),
            default_ttl: config.default_ttl,
        }
    }

    /// Parses `policy` from its string tag (`"lru"` / `"lfu"`) and builds a
    /// cache, failing with [`crate::error::Error::InvalidPolicy`] on any
    /// other tag. Mirrors the factory described by the cache contract.
    pub fn from_policy_tag(tag: &str, config: CacheConfig) -> Result<Self> {
        let policy: EvictionPolicy = tag.parse()?;
        Ok(Self::new(policy, config))
    }

    /// Inserts or overwrites `key`. `ttl` overrides the cache's default TTL
    /// for this item: `None` uses the default, `Some(None)` forces no
    /// expiration, `Some(Some(d))` expires after `d`.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Option<Duration>>) {
        let mut guard = self.inner.write();
        match &mut *guard {
            Engine::Lru(e) => e.set(key.into(), value, ttl),
            Engine::Lfu(e) => e.set(key.into(), value, ttl),
        }
    }

    /// Looks up `key`, recording an access on a hit. Fails with `NotFound`
    /// on a miss or a lazily-discovered expiry.
    pub fn get(&self, key: &str) -> Result<V> {
        let mut guard = self.inner.write();
        match &mut *guard {
            Engine::Lru(e) => e.get(key),
            Engine::Lfu(e) => e.get(key),
        }
    }

    /// Inserts `key` only if it doesn't already name a live item. Returns
    /// whether it was inserted, so callers can surface a conflict instead
    /// of silently overwriting (the Cache contract's own `set` always
    /// upserts; this is the primitive the HTTP `POST` endpoint needs).
    pub fn set_if_absent(&self, key: impl Into<String>, value: V, ttl: Option<Option<Duration>>) -> bool {
        let mut guard = self.inner.write();
        match &mut *guard {
            Engine::Lru(e) => e.set_if_absent(key.into(), value, ttl),
            Engine::Lfu(e) => e.set_if_absent(key.into(), value, ttl),
        }
    }

    /// Overwrites `key` only if it already names a live item. Returns
    /// whether it was updated; the HTTP `PUT` endpoint uses this to report
    /// 404 instead of silently creating the key.
    pub fn set_if_present(&self, key: impl Into<String>, value: V, ttl: Option<Option<Duration>>) -> bool {
        let mut guard = self.inner.write();
        match &mut *guard {
            Engine::Lru(e) => e.set_if_present(key.into(), value, ttl),
            Engine::Lfu(e) => e.set_if_present(key.into(), value, ttl),
        }
    }

    /// Removes `key`. Returns whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        let mut guard = self.inner.write();
        match &mut *guard {
            Engine::Lru(e) => e.delete(key),
            Engine::Lfu(e) => e.delete(key),
        }
    }

    /// Drops every item, resetting size to zero.
    pub fn purge(&self) {
        let mut guard = self.inner.write();
        match &mut *guard {
            Engine::Lru(e) => e.purge(),
            Engine::Lfu(e) => e.purge(),
        }
    }

    /// A snapshot of current occupancy. Only takes a shared lock.
    pub fn info(&self) -> CacheInfo {
        let guard = self.inner.read();
        match &*guard {
            Engine::Lru(e) => e.info(),
            Engine::Lfu(e) => e.info(),
        }
    }

    /// The default TTL new items receive unless they specify their own.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    /// Evicts every item whose deadline has passed as of `now`. Called by
    /// the background sweeper; exposed here so the server crate can drive
    /// the timer loop while the engine stays synchronous.
    pub fn sweep_expired_at(&self, now: Instant) -> usize {
        let mut guard = self.inner.write();
        match &mut *guard {
            Engine::Lru(e) => e.sweep_expired(now),
            Engine::Lfu(e) => e.sweep_expired(now),
        }
    }

    /// Evicts every item expired as of the current instant.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(policy: EvictionPolicy, capacity: usize) -> Cache<i32> {
        Cache::new(policy, CacheConfig::new(capacity, None))
    }

    #[test]
    fn set_then_get_round_trips_under_both_policies() {
        for policy in [EvictionPolicy::Lru, EvictionPolicy::Lfu] {
            let c = cache(policy, 4);
            c.set("k", 7, None);
            assert_eq!(c.get("k").unwrap(), 7);
        }
    }

    #[test]
    fn delete_is_not_idempotent_on_success() {
        let c = cache(EvictionPolicy::Lru, 4);
        c.set("k", 1, None);
        assert!(c.delete("k"));
        assert!(!c.delete("k"));
        assert!(c.get("k").is_err());
    }

    #[test]
    fn purge_resets_size_and_evicts_everything() {
        let c = cache(EvictionPolicy::Lfu, 4);
        c.set("a", 1, None);
        c.set("b", 2, None);
        c.purge();
        assert_eq!(c.info().size, 0);
        assert!(c.get("a").is_err());
    }

    #[test]
    fn set_if_absent_refuses_to_overwrite_a_live_key() {
        let c = cache(EvictionPolicy::Lru, 4);
        assert!(c.set_if_absent("k", 1, None));
        assert!(!c.set_if_absent("k", 2, None));
        assert_eq!(c.get("k").unwrap(), 1);
    }

    #[test]
    fn set_if_present_refuses_to_create_a_missing_key() {
        let c = cache(EvictionPolicy::Lru, 4);
        assert!(!c.set_if_present("k", 1, None));
        assert!(c.get("k").is_err());
        c.set("k", 1, None);
        assert!(c.set_if_present("k", 2, None));
        assert_eq!(c.get("k").unwrap(), 2);
    }

    #[test]
    fn invalid_policy_tag_is_rejected() {
        let err = Cache::<i32>::from_policy_tag("fifo", CacheConfig::new(4, None)).unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidPolicy(_)));
    }

    #[test]
    fn lfu_promotes_frequently_read_keys_past_a_full_capacity() {
        let c = cache(EvictionPolicy::Lfu, 2);
        c.set("cold", 1, None);
        c.set("hot", 2, None);
        // Touch "hot" so it's no longer in the frequency-0 bucket.
        assert_eq!(c.get("hot").unwrap(), 2);
        c.set("new", 3, None);
        // "cold" was the least-frequently-used and should have been evicted.
        assert!(c.get("cold").is_err());
        assert_eq!(c.get("hot").unwrap(), 2);
        assert_eq!(c.get("new").unwrap(), 3);
    }
}

//! Engine configuration: which eviction algorithm to run and the bounds it
//! enforces.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// Which eviction algorithm a [`crate::cache::Cache`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Evict the least-recently-used key once capacity is exceeded.
    Lru,
    /// Evict the least-frequently-used key once capacity is exceeded, with
    /// ties broken by recency within the lowest frequency bucket.
    Lfu,
}

impl FromStr for EvictionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            other => Err(Error::InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
        };
        f.write_str(tag)
    }
}

/// Bounds and defaults a [`crate::cache::Cache`] is constructed with.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Maximum number of items the cache holds before it evicts.
    pub capacity: usize,
    /// TTL applied to a `Set` that doesn't specify its own, or `None` for
    /// no TTL by default.
    pub default_ttl: Option<Duration>,
}

impl CacheConfig {
    /// Bundles a capacity (`0` = unbounded) with a default TTL.
    pub fn new(capacity: usize, default_ttl: Option<Duration>) -> Self {
        CacheConfig { capacity, default_ttl }
    }
}

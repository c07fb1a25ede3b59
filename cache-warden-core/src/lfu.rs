//! Least-frequently-used eviction engine.
//!
//! Keys are grouped into frequency buckets kept in a [`crate::list::ArenaList`]
//! ordered by strictly increasing access count from front to back: a fresh
//! key lands in the count-0 bucket at the front, and every `get` promotes
//! its key one bucket toward the back, splicing a new bucket in between
//! when none already exists for `count + 1`. Eviction drops the entire
//! front bucket — the coldest cohort, by construction the minimum count in
//! the list — matching the contract's tie-breaking rule of "no tie-breaking
//! required within a bucket".

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::entry::{resolve_ttl, Item};
use crate::error::{Error, Result};
use crate::list::{ArenaList, NodeId};
use crate::CacheInfo;

struct Bucket {
    count: u64,
    keys: HashSet<String>,
}

struct IndexEntry<V> {
    item: Item<V>,
    bucket: NodeId,
}

/// The LFU engine. Not thread-safe on its own; see [`crate::cache::Cache`].
pub struct LfuEngine<V> {
    capacity: usize,
    default_ttl: Option<Duration>,
    buckets: ArenaList<Bucket>,
    index: HashMap<String, IndexEntry<V>>,
}

impl<V: Clone> LfuEngine<V> {
    /// Creates an engine with the given capacity (0 means unbounded) and
    /// default per-item TTL.
    pub fn new(capacity: usize, default_ttl: Option<Duration>) -> Self {
        LfuEngine {
            capacity,
            default_ttl,
            buckets: ArenaList::new(),
            index: HashMap::new(),
        }
    }

    /// Whether `key` currently names a live item, lazily evicting it first
    /// if expired. Never promotes: existence checks are not an access.
    pub fn contains_live(&mut self, key: &str) -> bool {
        let expired = match self.index.get(key) {
            Some(entry) => entry.item.is_expired(),
            None => return false,
        };
        if expired {
            self.remove_key(key);
            return false;
        }
        true
    }

    /// Inserts `key` only if it isn't already present (after lazily
    /// expiring it if needed). Returns whether it was inserted.
    pub fn set_if_absent(&mut self, key: String, value: V, ttl: Option<Option<Duration>>) -> bool {
        if self.contains_live(&key) {
            return false;
        }
        self.set(key, value, ttl);
        true
    }

    /// Overwrites `key` only if it's already present. Returns whether it
    /// was updated.
    pub fn set_if_present(&mut self, key: String, value: V, ttl: Option<Option<Duration>>) -> bool {
        if !self.contains_live(&key) {
            return false;
        }
        self.set(key, value, ttl);
        true
    }

    /// Inserts or overwrites `key` without counting as an access; a fresh
    /// key starts in the count-0 bucket.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Option<Duration>>) {
        let ttl = resolve_ttl(ttl, self.default_ttl);
        if let Some(entry) = self.index.get_mut(&key) {
            entry.item.refresh(value, ttl);
            return;
        }
        if self.capacity > 0 && self.index.len() >= self.capacity {
            self.evict_coldest_bucket();
        }
        let bucket = self.zero_bucket();
        self.buckets.get_mut(bucket).keys.insert(key.clone());
        self.index.insert(
            key,
            IndexEntry {
                item: Item::new(value, ttl),
                bucket,
            },
        );
    }

    /// Looks up `key`, promoting it to the next frequency bucket on a hit.
    /// Lazily evicts and reports a miss if the stored item has expired.
    pub fn get(&mut self, key: &str) -> Result<V> {
        let expired = {
            let entry = self.index.get(key).ok_or(Error::NotFound)?;
            entry.item.is_expired()
        };
        if expired {
            self.remove_key(key);
            return Err(Error::NotFound);
        }
        let new_bucket = self.promote(key);
        let entry = self.index.get_mut(key).expect("key present after promote");
        entry.bucket = new_bucket;
        Ok(entry.item.value().clone())
    }

    /// Removes `key` unconditionally. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_key(key)
    }

    /// Drops every item.
    pub fn purge(&mut self) {
        self.buckets.clear();
        self.index.clear();
    }

    /// Current size and configured capacity.
    pub fn info(&self) -> CacheInfo {
        CacheInfo {
            size: self.index.len(),
            capacity: self.capacity,
        }
    }

    /// Removes every item whose deadline has passed as of `now`. Returns the
    /// number of items reclaimed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<String> = self
            .index
            .iter()
            .filter(|(_, e)| e.item.is_expired_at(now))
            .map(|(k, _)| k.clone())
            .collect();
        let count = expired.len();
        for key in expired {
            self.remove_key(&key);
        }
        count
    }

    /// Returns the bucket for count 0, creating it at the front if absent.
    fn zero_bucket(&mut self) -> NodeId {
        if let Some(front) = self.buckets.front_id() {
            if self.buckets.get(front).count == 0 {
                return front;
            }
        }
        self.buckets.push_front(Bucket {
            count: 0,
            keys: HashSet::new(),
        })
    }

    /// Moves `key` to the next-higher frequency bucket, splicing a new one
    /// in if needed, and returns the handle of its new bucket.
    fn promote(&mut self, key: &str) -> NodeId {
        let old_bucket = self.index.get(key).expect("key present").bucket;
        let count = self.buckets.get(old_bucket).count;

        let dest = self.next_bucket_for(old_bucket, count + 1);
        self.buckets.get_mut(dest).keys.insert(key.to_string());
        self.buckets.get_mut(old_bucket).keys.remove(key);
        if self.buckets.get(old_bucket).keys.is_empty() {
            self.buckets.remove(old_bucket);
        }
        dest
    }

    /// Finds or creates the bucket immediately after `after` holding `count`.
    fn next_bucket_for(&mut self, after: NodeId, count: u64) -> NodeId {
        if let Some(succ) = self.buckets.next_id(after) {
            if self.buckets.get(succ).count == count {
                return succ;
            }
        }
        self.buckets.insert_after(
            after,
            Bucket {
                count,
                keys: HashSet::new(),
            },
        )
    }

    /// Evicts the front bucket: the lowest frequency count currently
    /// resident, hence the least-frequently-used cohort. May drop more than
    /// one key in a single admission if several keys share that count.
    fn evict_coldest_bucket(&mut self) {
        if let Some(bucket) = self.buckets.pop_front() {
            for key in bucket.keys {
                self.index.remove(&key);
            }
        }
    }

    fn remove_key(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(entry) => {
                let bucket = self.buckets.get_mut(entry.bucket);
                bucket.keys.remove(key);
                if bucket.keys.is_empty() {
                    self.buckets.remove(entry.bucket);
                }
                true
            }
            None => false,
        }
    }
}

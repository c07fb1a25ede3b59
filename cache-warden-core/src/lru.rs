//! Least-recently-used eviction engine.
//!
//! A single [`crate::list::ArenaList`] tracks recency order: the front is
//! the most recently touched key, the back is the next eviction candidate.
//! A `HashMap` gives O(1) lookup from key to the list node holding it.
//!
//! Per the single-lock concurrency model this engine is synchronous and
//! unsynchronized internally; callers hold the shared `RwLock` for the
//! duration of every call, including `get`, because a hit always moves the
//! node to the front.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::entry::{resolve_ttl, Item};
use crate::error::{Error, Result};
use crate::list::{ArenaList, NodeId};
use crate::CacheInfo;

struct Node<V> {
    key: String,
    item: Item<V>,
}

/// The LRU engine. Not thread-safe on its own; see [`crate::cache::Cache`].
pub struct LruEngine<V> {
    capacity: usize,
    default_ttl: Option<Duration>,
    order: ArenaList<Node<V>>,
    index: HashMap<String, NodeId>,
}

impl<V: Clone> LruEngine<V> {
    /// Creates an engine with the given capacity (0 means unbounded) and
    /// default per-item TTL.
    pub fn new(capacity: usize, default_ttl: Option<Duration>) -> Self {
        LruEngine {
            capacity,
            default_ttl,
            order: ArenaList::new(),
            index: HashMap::new(),
        }
    }

    /// Whether `key` currently names a live item, removing it first if its
    /// deadline has already passed. Does not count as an access: it never
    /// promotes the node, matching the contract's distinction between
    /// "Set is not a read" and lazy expiry being a normal bookkeeping step
    /// rather than a user-visible one.
    pub fn contains_live(&mut self, key: &str) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.order.get(id).item.is_expired() {
            self.remove_node(key, id);
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

    /// Inserts or overwrites `key`. `ttl` overrides the engine's default for
    /// this item; `Some(None)` forces no expiration, `None` means "use the
    /// default".
    pub fn set(&mut self, key: String, value: V, ttl: Option<Option<Duration>>) {
        let ttl = resolve_ttl(ttl, self.default_ttl);
        if let Some(&id) = self.index.get(&key) {
            self.order.get_mut(id).item.refresh(value, ttl);
            self.order.move_to_front(id);
            return;
        }
        if self.capacity > 0 && self.index.len() >= self.capacity {
            self.evict_one();
        }
        let id = self.order.push_front(Node {
            key: key.clone(),
            item: Item::new(value, ttl),
        });
        self.index.insert(key, id);
    }

    /// Looks up `key`, promoting it to most-recently-used on a hit.
    /// Lazily evicts and reports a miss if the stored item has expired.
    pub fn get(&mut self, key: &str) -> Result<V> {
        let id = *self.index.get(key).ok_or(Error::NotFound)?;
        if self.order.get(id).item.is_expired() {
            self.remove_node(key, id);
            return Err(Error::NotFound);
        }
        self.order.move_to_front(id);
        Ok(self.order.get(id).item.value().clone())
    }

    /// Removes `key` unconditionally. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.order.remove(id);
                true
            }
            None => false,
        }
    }

    /// Drops every item.
    pub fn purge(&mut self) {
        self.order.clear();
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
    /// number of items reclaimed. Driven by the background sweeper.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<NodeId> = self
            .index
            .values()
            .copied()
            .filter(|&id| self.order.get(id).item.is_expired_at(now))
            .collect();
        let count = expired.len();
        for id in expired {
            let key = self.order.get(id).key.clone();
            self.index.remove(&key);
            self.order.remove(id);
        }
        count
    }

    fn evict_one(&mut self) {
        if let Some(node) = self.order.pop_back() {
            self.index.remove(&node.key);
        }
    }

    fn remove_node(&mut self, key: &str, id: NodeId) {
        self.index.remove(key);
        self.order.remove(id);
    }
}

//! The value wrapper stored behind every key.
//!
//! Each item carries an optional absolute expiration deadline. A `None`
//! deadline means the item never expires on its own (it can still be
//! evicted for capacity reasons). Expiration is checked lazily against
//! [`std::time::Instant`] rather than wall-clock time, so the cache is
//! immune to clock adjustments made while it is running.

use std::time::{Duration, Instant};

/// A value together with its expiration deadline.
#[derive(Debug, Clone)]
pub struct Item<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Item<V> {
    /// Wraps `value`, expiring it after `ttl` from now. `ttl == None` means
    /// the item never expires.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        Item {
            value,
            expires_at: ttl.map(|d| Instant::now() + d),
        }
    }

    /// Borrow the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Take ownership of the stored value, discarding the deadline.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Replace the stored value and deadline in place, e.g. on an
    /// overwriting `Set`.
    pub fn refresh(&mut self, value: V, ttl: Option<Duration>) {
        self.value = value;
        self.expires_at = ttl.map(|d| Instant::now() + d);
    }

    /// Whether this item's deadline has passed as of `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }

    /// Whether this item's deadline has passed as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Resolves a `Set`'s TTL argument against the cache's default: an explicit
/// zero duration is not a real deadline, so it falls through to
/// `default_ttl` exactly as if no TTL had been given at all, and a zero
/// `default_ttl` likewise means unset rather than "expire immediately".
/// `Some(None)` still forces no expiration outright, bypassing the default.
pub(crate) fn resolve_ttl(ttl: Option<Option<Duration>>, default_ttl: Option<Duration>) -> Option<Duration> {
    match ttl {
        Some(Some(d)) if !d.is_zero() => Some(d),
        Some(None) => None,
        _ => default_ttl.filter(|d| !d.is_zero()),
    }
}

use std::thread::sleep;
use std::time::Duration;

use cache_warden_core::{Cache, CacheConfig, EvictionPolicy, Error};

fn make_lru(capacity: usize) -> Cache<i32> {
    Cache::new(EvictionPolicy::Lru, CacheConfig::new(capacity, None))
}

fn make_lru_with_ttl(capacity: usize, default_ttl: Duration) -> Cache<&'static str> {
    Cache::new(EvictionPolicy::Lru, CacheConfig::new(capacity, Some(default_ttl)))
}

fn make_lfu(capacity: usize) -> Cache<i32> {
    Cache::new(EvictionPolicy::Lfu, CacheConfig::new(capacity, None))
}

#[test]
fn lru_move_to_front() {
    let cache = make_lru(2);
    cache.set("a", 1, None);
    cache.set("b", 2, None);
    assert_eq!(cache.get("a").unwrap(), 1);
    cache.set("c", 3, None);

    assert_eq!(cache.get("a").unwrap(), 1);
    assert_eq!(cache.get("b"), Err(Error::NotFound));
    assert_eq!(cache.get("c").unwrap(), 3);
}

#[test]
fn lfu_promotion() {
    let cache = make_lfu(2);
    cache.set("a", 1, None);
    cache.set("b", 2, None);
    assert_eq!(cache.get("a").unwrap(), 1);
    assert_eq!(cache.get("a").unwrap(), 1);
    cache.set("c", 3, None);

    assert_eq!(cache.get("b"), Err(Error::NotFound));
    assert_eq!(cache.get("a").unwrap(), 1);
    assert_eq!(cache.get("c").unwrap(), 3);
}

#[test]
fn ttl_lazy_expiry() {
    let cache = make_lru(10);
    cache.set("k", "v", Some(Some(Duration::from_millis(50))));
    sleep(Duration::from_millis(80));

    assert_eq!(cache.get("k"), Err(Error::NotFound));
    assert_eq!(cache.info().size, 0);
}

#[test]
fn default_ttl_applied_when_set_specifies_none() {
    let cache = make_lru_with_ttl(10, Duration::from_millis(30));
    cache.set("k", "v", None);
    sleep(Duration::from_millis(60));

    assert_eq!(cache.get("k"), Err(Error::NotFound));
}

#[test]
fn explicit_ttl_overrides_default() {
    let cache = make_lru_with_ttl(10, Duration::from_millis(5));
    cache.set("k", "v", Some(Some(Duration::from_millis(200))));
    sleep(Duration::from_millis(40));

    assert_eq!(cache.get("k").unwrap(), "v");
}

#[test]
fn explicit_zero_ttl_falls_through_to_default() {
    let cache = make_lru_with_ttl(10, Duration::from_millis(30));
    cache.set("k", "v", Some(Some(Duration::ZERO)));
    sleep(Duration::from_millis(60));

    assert_eq!(cache.get("k"), Err(Error::NotFound));
}

#[test]
fn purge_drops_everything() {
    let cache = make_lru(200);
    for i in 0..100 {
        cache.set(i.to_string(), i, None);
    }
    cache.purge();

    assert_eq!(cache.info().size, 0);
    for i in 0..100 {
        assert_eq!(cache.get(&i.to_string()), Err(Error::NotFound));
    }
}

#[test]
fn sweeper_reclaims_without_an_intervening_get() {
    let cache = make_lru(5);
    cache.set("a", 1, Some(Some(Duration::from_millis(10))));
    cache.set("b", 2, Some(Some(Duration::from_millis(10))));
    cache.set("c", 3, Some(Some(Duration::from_millis(10))));
    sleep(Duration::from_millis(50));

    let reclaimed = cache.sweep_expired();
    assert_eq!(reclaimed, 3);
    assert_eq!(cache.info().size, 0);
}

#[test]
fn delete_is_idempotent_on_the_error_path() {
    let cache = make_lru(4);
    cache.set("a", 1, None);
    assert!(cache.delete("a"));
    assert!(!cache.delete("a"));
}

#[test]
fn lru_eviction_order_drops_first_inserted_key() {
    let cache = make_lru(3);
    for key in ["a", "b", "c", "d"] {
        cache.set(key, 1, None);
    }
    assert_eq!(cache.get("a"), Err(Error::NotFound));
    assert_eq!(cache.get("b").unwrap(), 1);
    assert_eq!(cache.get("c").unwrap(), 1);
    assert_eq!(cache.get("d").unwrap(), 1);
}

#[test]
fn lfu_eviction_order_drops_the_least_read_key() {
    let cache = make_lfu(3);
    cache.set("a", 1, None);
    cache.set("b", 2, None);
    cache.set("c", 3, None);
    // "a" and "b" get read; "c" never does, so it's the coldest.
    cache.get("a").unwrap();
    cache.get("b").unwrap();
    cache.set("d", 4, None);

    assert_eq!(cache.get("c"), Err(Error::NotFound));
    assert_eq!(cache.get("a").unwrap(), 1);
    assert_eq!(cache.get("b").unwrap(), 2);
    assert_eq!(cache.get("d").unwrap(), 4);
}

#[test]
fn invalid_policy_tag_surfaces_as_a_construction_error() {
    let err = Cache::<i32>::from_policy_tag("mru", CacheConfig::new(4, None)).unwrap_err();
    assert_eq!(err, Error::InvalidPolicy("mru".to_string()));
}

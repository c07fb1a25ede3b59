use std::sync::Arc;
use std::time::Duration;

use cache_warden_core::{Cache, CacheConfig, EvictionPolicy};

#[test]
fn concurrent_readers_and_writers_never_violate_the_capacity_bound() {
    let cache = Arc::new(Cache::<i32>::new(
        EvictionPolicy::Lru,
        CacheConfig::new(64, None),
    ));

    let mut pool = scoped_threadpool::Pool::new(8);
    pool.scoped(|scope| {
        for worker in 0..8 {
            let cache = Arc::clone(&cache);
            scope.execute(move || {
                for i in 0..500 {
                    let key = format!("w{worker}-k{}", i % 100);
                    cache.set(key.clone(), i, None);
                    let _ = cache.get(&key);
                }
            });
        }
    });

    assert!(cache.info().size <= 64);
}

#[test]
fn concurrent_lfu_access_keeps_index_and_buckets_coherent() {
    let cache = Arc::new(Cache::<i32>::new(
        EvictionPolicy::Lfu,
        CacheConfig::new(32, None),
    ));

    let mut pool = scoped_threadpool::Pool::new(4);
    pool.scoped(|scope| {
        for worker in 0..4 {
            let cache = Arc::clone(&cache);
            scope.execute(move || {
                for i in 0..200 {
                    let key = format!("k{}", (worker * 37 + i) % 40);
                    cache.set(key.clone(), i, None);
                    let _ = cache.get(&key);
                }
            });
        }
    });

    assert!(cache.info().size <= 32);
}

#[test]
fn concurrent_sweeps_and_writes_never_panic() {
    let cache = Arc::new(Cache::<i32>::new(
        EvictionPolicy::Lru,
        CacheConfig::new(0, Some(Duration::from_millis(5))),
    ));

    let mut pool = scoped_threadpool::Pool::new(3);
    pool.scoped(|scope| {
        let writer_cache = Arc::clone(&cache);
        scope.execute(move || {
            for i in 0..1000 {
                writer_cache.set(format!("k{i}"), i, None);
            }
        });

        let sweeper_cache = Arc::clone(&cache);
        scope.execute(move || {
            for _ in 0..20 {
                sweeper_cache.sweep_expired();
                std::thread::sleep(Duration::from_millis(2));
            }
        });
    });
}

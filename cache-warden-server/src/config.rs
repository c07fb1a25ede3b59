//! Command-line flags, each overridable by an environment variable of the
//! same name in `SCREAMING_SNAKE_CASE` with a `CACHE_` prefix.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

/// Configuration accepted at process start.
#[derive(Parser, Debug, Clone)]
#[command(name = "cache-warden", about = "A networked key/value cache with LRU/LFU eviction")]
pub struct Args {
    /// Maximum number of items the cache holds before evicting. 0 = unbounded.
    #[arg(long, env = "CACHE_CAPACITY", default_value_t = 0)]
    pub capacity: u64,

    /// Eviction discipline: "lru" or "lfu".
    #[arg(long, env = "CACHE_EVICTION_POLICY", default_value = "lru")]
    pub eviction_policy: String,

    /// TTL applied to a Set that doesn't specify its own, e.g. "30s", "5m".
    #[arg(long, env = "CACHE_DEFAULT_TTL", value_parser = humantime::parse_duration)]
    pub default_ttl: Option<Duration>,

    /// How often the background sweeper scans for expired items.
    #[arg(long, env = "CACHE_SWEEP_INTERVAL", default_value = "30s", value_parser = humantime::parse_duration)]
    pub sweep_interval: Duration,

    /// Address the HTTP listener binds to.
    #[arg(long, env = "CACHE_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Shared secret clients must present to `/auth/token`. Required; the
    /// process refuses to start without one.
    #[arg(long, env = "CACHE_AUTH_SECRET")]
    pub auth_secret: String,
}

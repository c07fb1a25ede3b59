//! Background task that periodically reclaims expired items.
//!
//! Lazy expiration in `Get` is authoritative; this task only bounds memory
//! for keys nobody reads again. It is cancellable so graceful shutdown can
//! stop it between ticks rather than mid-sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::state::AppState;

pub async fn run(state: Arc<AppState>, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await; // first tick fires immediately; skip it

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("expiration sweeper shutting down");
                return;
            }
            _ = ticker.tick() => {
                let reclaimed = state.cache.sweep_expired();
                if reclaimed > 0 {
                    info!(reclaimed, "expiration sweeper pass reclaimed items");
                }
            }
        }
    }
}

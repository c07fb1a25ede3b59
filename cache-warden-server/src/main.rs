use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cache_warden_core::{Cache, CacheConfig};
use cache_warden_server::auth::AuthState;
use cache_warden_server::config::Args;
use cache_warden_server::state::AppState;
use cache_warden_server::{build_router, sweeper};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let policy: cache_warden_core::EvictionPolicy = args
        .eviction_policy
        .parse()
        .map_err(anyhow::Error::from)
        .context("invalid --eviction-policy")?;
    let config = CacheConfig::new(args.capacity as usize, args.default_ttl);

    let state = Arc::new(AppState {
        cache: Cache::new(policy, config),
        auth: AuthState::new(),
        auth_secret: args.auth_secret.clone(),
    });

    let cancel = CancellationToken::new();
    let sweeper_handle = tokio::spawn(sweeper::run(
        Arc::clone(&state),
        args.sweep_interval,
        cancel.clone(),
    ));

    let app = build_router(Arc::clone(&state));

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %args.bind, "cache-warden-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    cancel.cancel();
    let _ = sweeper_handle.await;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

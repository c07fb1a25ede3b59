//! HTTP service wiring: router construction, shared state, auth, and
//! configuration. `main` is a thin binary entry point over [`build_router`]
//! and [`sweeper::run`].

pub mod auth;
pub mod auth_middleware;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod sweeper;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::SharedState;

/// Builds the full router: public routes (auth issuance, health) plus the
/// item/cache routes gated behind [`auth_middleware::require_auth`].
pub fn build_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/items", post(handlers::items::create_item))
        .route(
            "/items/:key",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        .route(
            "/cache",
            get(handlers::cache::get_cache_info).delete(handlers::cache::purge_cache),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth_middleware::require_auth,
        ));

    let public = Router::new()
        .route("/auth/token", post(handlers::auth::issue_token))
        .route("/auth/refresh", post(handlers::auth::refresh_token))
        .route("/healthz", get(handlers::health::healthz));

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

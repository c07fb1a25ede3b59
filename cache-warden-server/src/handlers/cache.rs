//! `/cache` handlers: occupancy info and purge.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct CacheInfoBody {
    size: usize,
    capacity: usize,
    default_ttl: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CacheInfoResponse {
    info: CacheInfoBody,
}

pub async fn get_cache_info(State(state): State<SharedState>) -> Json<CacheInfoResponse> {
    let info = state.cache.info();
    Json(CacheInfoResponse {
        info: CacheInfoBody {
            size: info.size,
            capacity: info.capacity,
            default_ttl: state.cache.default_ttl().map(|d| humantime::format_duration(d).to_string()),
        },
    })
}

pub async fn purge_cache(State(state): State<SharedState>) -> StatusCode {
    state.cache.purge();
    StatusCode::NO_CONTENT
}

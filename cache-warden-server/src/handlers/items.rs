//! `/items/{key}` and `/items` handlers.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
    key: String,
    value: Value,
    ttl: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
    value: Value,
    ttl: Option<String>,
}

fn parse_ttl(ttl: Option<&str>) -> Result<Option<Option<Duration>>, ApiError> {
    match ttl {
        None => Ok(None),
        Some(raw) => humantime::parse_duration(raw)
            .map(|d| Some(Some(d)))
            .map_err(|e| ApiError::InvalidInput(format!("invalid ttl {raw:?}: {e}"))),
    }
}

pub async fn get_item(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let value = state.cache.get(&key)?;
    Ok(Json(value))
}

pub async fn create_item(
    State(state): State<SharedState>,
    Json(body): Json<CreateItemBody>,
) -> Result<StatusCode, ApiError> {
    if body.key.is_empty() {
        return Err(ApiError::InvalidInput("key must not be empty".to_string()));
    }
    if body.value.is_null() {
        return Err(ApiError::InvalidInput("value must not be null".to_string()));
    }
    let ttl = parse_ttl(body.ttl.as_deref())?;
    let inserted = state.cache.set_if_absent(body.key, body.value, ttl);
    if inserted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::Conflict)
    }
}

pub async fn update_item(
    State(state): State<SharedState>,
    Path(key): Path<String>,
    Json(body): Json<UpdateItemBody>,
) -> Result<StatusCode, ApiError> {
    if body.value.is_null() {
        return Err(ApiError::InvalidInput("value must not be null".to_string()));
    }
    let ttl = parse_ttl(body.ttl.as_deref())?;
    let updated = state.cache.set_if_present(key, body.value, ttl);
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

pub async fn delete_item(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.cache.delete(&key) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ttl_accepts_humantime_literals() {
        assert_eq!(parse_ttl(Some("500ms")).unwrap(), Some(Some(Duration::from_millis(500))));
        assert_eq!(parse_ttl(None).unwrap(), None);
    }

    #[test]
    fn parse_ttl_rejects_garbage() {
        assert!(parse_ttl(Some("not-a-duration")).is_err());
    }
}

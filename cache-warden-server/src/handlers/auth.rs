//! `/auth/token` and `/auth/refresh` handlers.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    secret: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    token: String,
}

pub async fn issue_token(
    State(state): State<SharedState>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    if body.secret != state.auth_secret {
        return Err(ApiError::Unauthorized);
    }
    let token = state.auth.issue()?;
    Ok(Json(TokenResponse { token }))
}

pub async fn refresh_token(
    State(state): State<SharedState>,
    headers: axum::http::HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let fresh = state.auth.refresh(token)?;
    Ok(Json(TokenResponse { token: fresh }))
}

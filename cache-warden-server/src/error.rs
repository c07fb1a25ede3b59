//! The HTTP-facing error taxonomy. A superset of the engine's own errors,
//! covering the failure modes introduced by the transport and auth layers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("key not found")]
    NotFound,

    #[error("key already exists")]
    Conflict,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid eviction policy: {0}")]
    InvalidPolicy(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<cache_warden_core::Error> for ApiError {
    fn from(err: cache_warden_core::Error) -> Self {
        match err {
            cache_warden_core::Error::NotFound => ApiError::NotFound,
            cache_warden_core::Error::InvalidPolicy(tag) => ApiError::InvalidPolicy(tag),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::InvalidInput(_) | ApiError::InvalidPolicy(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody { error: self.to_string() };
        (status, Json(body)).into_response()
    }
}

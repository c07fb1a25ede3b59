//! `/healthz` liveness probe. Unauthenticated, ambient — not part of the
//! data plane, but every service in this lineage exposes one.

use axum::http::StatusCode;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

//! Liveness probe.

use axum::http::StatusCode;
use axum::response::Response;

use crate::http::response::{self, Status};

/// `{ ok: true }` / 200. Body and query string are ignored.
pub async fn health() -> Response {
    response::json(StatusCode::OK, &Status { ok: true })
}

//! Route handlers.
//!
//! Each handler is a plain async function so it can be called directly in
//! tests; the dispatch table in `http::server` decides which one runs.

pub mod health;
pub mod prospects;

use axum::http::StatusCode;
use axum::response::Response;

use crate::http::response::{self, Failure};

pub use health::health;
pub use prospects::attio_prospects;
pub use send_test::send_test;

/// `{ ok: false, error: "not_found" }` / 404 for anything the table does not know.
pub async fn not_found() -> Response {
    response::json(
        StatusCode::NOT_FOUND,
        &Failure {
            ok: false,
            error: "not_found",
        },
    )
}

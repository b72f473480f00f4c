//! CRM prospect import job.
//!
//! Placeholder route: it answers 501 with a fixed envelope and ignores the body.

use axum::http::StatusCode;
use axum::response::Response;

use crate::http::response::{self, Message};

/// `{ ok: true, message: "not implemented" }` / 501.
pub async fn attio_prospects() -> Response {
    response::json(
        StatusCode::NOT_IMPLEMENTED,
        &Message {
            ok: true,
            message: "not implemented",
        },
    )
}

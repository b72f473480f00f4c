//! Response formatting.
//!
//! # Responsibilities
//! - Render `{ ok, ... }` envelopes as pretty-printed JSON
//! - Map unhandled route errors to a bare 500
//!
//! # Design Decisions
//! - `ok` is always the first key (typed structs, not maps)
//! - Only not-found and not-implemented get a designed envelope; everything
//!   else that fails is an unhandled error with a plain-text body

use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::http::body::BodyError;
use crate::loops::LoopsError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// `{ "ok": true }`
#[derive(Debug, Serialize)]
pub struct Status {
    pub ok: bool,
}

/// `{ "ok": ..., "message": ... }`
#[derive(Debug, Serialize)]
pub struct Message {
    pub ok: bool,
    pub message: &'static str,
}

/// `{ "ok": false, "error": ... }`
#[derive(Debug, Serialize)]
pub struct Failure {
    pub ok: bool,
    pub error: &'static str,
}

/// Render `data` as pretty JSON with the given status.
pub fn json<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_string_pretty(data) {
        Ok(body) => (status, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// A failure that escapes a route handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Loops(#[from] LoopsError),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Unhandled error in route handler");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            "Internal Server Error",
        )
            .into_response()
    }
}

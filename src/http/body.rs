//! Request body reading.
//!
//! JSON bodies are parsed only when the `content-type` says so; anything
//! else reads as an empty object. Parse failures are returned, not swallowed.

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, HeaderMap};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors reading an inbound body.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("failed to read request body: {0}")]
    Read(#[source] axum::Error),

    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// The body parsed as JSON `null`, which has no fields to read.
    #[error("request body is null")]
    Null,
}

/// Whether a `content-type` value declares JSON.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains("application/json"))
}

/// Interpret already-buffered bytes.
pub fn parse_body(content_type: Option<&str>, bytes: &[u8]) -> Result<Value, BodyError> {
    if !is_json_content_type(content_type) {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Read and interpret a request body, buffering at most `limit` bytes.
pub async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Value, BodyError> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    if !is_json_content_type(content_type) {
        return Ok(Value::Object(Map::new()));
    }

    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(BodyError::Read)?;
    parse_body(content_type, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type(Some("application/json")));
        assert!(is_json_content_type(Some("application/json; charset=utf-8")));
        assert!(!is_json_content_type(Some("text/plain")));
        assert!(!is_json_content_type(None));
    }

    #[test]
    fn test_non_json_yields_empty_object() {
        let value = parse_body(Some("text/plain"), b"{\"email\":\"x@y.z\"}").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = parse_body(Some("application/json"), b"{not json").unwrap_err();
        assert!(matches!(err, BodyError::Json(_)));
        assert!(parse_body(Some("application/json"), b"").is_err());
    }

    #[tokio::test]
    async fn test_read_body_parses_json() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let value = read_body(&headers, Body::from(r#"{"email":"a@b.com"}"#), 1024)
            .await
            .unwrap();
        assert_eq!(value, json!({ "email": "a@b.com" }));
    }

    #[tokio::test]
    async fn test_read_body_enforces_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let err = read_body(&headers, Body::from(vec![b' '; 64]), 16)
            .await
            .unwrap_err();
        assert!(matches!(err, BodyError::Read(_)));
    }
}

//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use marketing_relay::config::WorkerConfig;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const CONTACTS_PATH: &str = "/api/v1/contacts/update";
pub const EVENTS_PATH: &str = "/api/v1/events/send";

/// One request received by the mock Loops API.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    contact_response: (u16, String),
    event_response: (u16, String),
}

/// In-process stand-in for the Loops API that records every call.
pub struct MockLoops {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockLoops {
    /// Start a mock with scripted (status, body) answers for each endpoint.
    pub async fn start(contact_response: (u16, &str), event_response: (u16, &str)) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            calls: calls.clone(),
            contact_response: (contact_response.0, contact_response.1.to_string()),
            event_response: (event_response.0, event_response.1.to_string()),
        };

        let app = Router::new()
            .route(CONTACTS_PATH, post(record))
            .route(EVENTS_PATH, post(record))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, calls }
    }

    /// Both endpoints answer 200 with a JSON success body.
    pub async fn healthy() -> Self {
        Self::start(
            (200, r#"{"success":true,"id":"contact_1"}"#),
            (200, r#"{"success":true}"#),
        )
        .await
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }
}

async fn record(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.calls.lock().unwrap().push(RecordedCall {
        path: uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let (status, body) = if uri.path() == CONTACTS_PATH {
        &state.contact_response
    } else {
        &state.event_response
    };
    (StatusCode::from_u16(*status).unwrap(), body.clone()).into_response()
}

/// A valid config pointing at `loops_url`.
pub fn test_config(loops_url: &str) -> WorkerConfig {
    let mut config = WorkerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.loops.api_key = "test-key".into();
    config.loops.base_url = loops_url.to_string();
    config.test_send.event_name = "default_evt".into();
    config.test_send.default_email = "default@example.com".into();
    config.timeouts.upstream_secs = 5;
    config
}

/// Send one request through `app`, returning status, headers, and body text.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

/// `POST /send/test` with a JSON body.
pub fn send_test_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/send/test")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

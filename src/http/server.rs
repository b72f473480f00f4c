//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the dispatch handler
//! - Wire up middleware (tracing, request ID, timeout)
//! - Body size limits live in the handlers that read a body
//! - Bind server to listener with graceful shutdown
//! - Dispatch requests through the route table to handlers

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::WorkerConfig;
use crate::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::loops::{LoopsClient, LoopsResult};
use crate::observability::metrics;
use crate::routing::{Route, Router as RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<WorkerConfig>,
    pub loops: LoopsClient,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Build state from a validated config.
    pub fn new(config: WorkerConfig) -> LoopsResult<Self> {
        let loops = LoopsClient::new(
            &config.loops,
            Duration::from_secs(config.timeouts.upstream_secs),
        )?;

        Ok(Self {
            config: Arc::new(config),
            loops,
            routes: Arc::new(RouteTable::default()),
        })
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: WorkerConfig) -> LoopsResult<Self> {
        let state = AppState::new(config)?;
        let router = Self::build_router(state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(state: AppState) -> Router {
        let timeout = Duration::from_secs(state.config.timeouts.request_secs);

        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(timeout))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        if self.state.config.attio.api_key.is_some() {
            tracing::info!("Attio API key configured; prospects job is not implemented yet");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Route every request through the dispatch table.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers())
        .unwrap_or("unknown")
        .to_string();

    let route = state.routes.match_request(&request);

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        route = route.map_or("none", Route::name),
        "Dispatching request"
    );

    let response = match route {
        Some(Route::Health) => handlers::health().await,
        Some(Route::SendTest) => {
            let (parts, body) = request.into_parts();
            handlers::send_test(&state, &parts.headers, body)
                .await
                .into_response()
        }
        Some(Route::AttioProspects) => handlers::attio_prospects().await,
        None => handlers::not_found().await,
    };

    metrics::record_request(
        method.as_str(),
        route.map_or("not_found", Route::name),
        response.status().as_u16(),
        start,
    );

    response
}

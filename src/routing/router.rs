//! Route lookup and dispatch table.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins; the table has no overlapping entries
//! - Explicit `None` rather than a silent default route

use axum::body::Body;
use axum::http::{Method, Request};

use crate::routing::matcher::{AndMatcher, ExactPathMatcher, Matcher, MethodMatcher};

/// Routes the relay serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /health`
    Health,
    /// `POST /send/test`
    SendTest,
    /// `POST /jobs/attio/prospects`
    AttioProspects,
}

impl Route {
    /// Label used in logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Route::Health => "health",
            Route::SendTest => "send_test",
            Route::AttioProspects => "attio_prospects",
        }
    }
}

#[derive(Debug)]
struct CompiledRoute {
    route: Route,
    matcher: AndMatcher,
}

/// Dispatch table from (method, path) to [`Route`].
#[derive(Debug)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Build an empty table.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Add an exact (method, path) entry.
    pub fn with_route(mut self, method: Method, path: &str, route: Route) -> Self {
        let matcher = AndMatcher::new(vec![
            Box::new(MethodMatcher::new(method)) as Box<dyn Matcher>,
            Box::new(ExactPathMatcher::new(path)),
        ]);
        self.routes.push(CompiledRoute { route, matcher });
        self
    }

    /// Find the route for a request.
    pub fn match_request(&self, req: &Request<Body>) -> Option<Route> {
        self.routes
            .iter()
            .find(|r| r.matcher.matches(req))
            .map(|r| r.route)
    }
}

impl Default for Router {
    /// The relay's route table.
    fn default() -> Self {
        Self::new()
            .with_route(Method::GET, "/health", Route::Health)
            .with_route(Method::POST, "/send/test", Route::SendTest)
            .with_route(Method::POST, "/jobs/attio/prospects", Route::AttioProspects)
    }
}

//! Marketing relay library.
//!
//! Relays marketing-automation requests to the Loops contact/event API.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod loops;
pub mod observability;
pub mod routing;
pub mod workflow;

pub use config::WorkerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

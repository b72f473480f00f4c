//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: matched Route or None (→ 404 envelope)
//! ```
//!
//! # Design Decisions
//! - Table built once, immutable at runtime
//! - Exact matching only: no parameters, no prefixes, query string ignored
//! - Handlers live in `handlers`, so each is testable without the table

pub mod matcher;
pub mod router;

pub use router::{Route, Router};

//! Contact-automation API (Loops) integration.
//!
//! # Data Flow
//! ```text
//! ContactUpsert / EventSend payload
//!     → client.rs (POST with bearer token)
//!     → ApiOutcome { status, body } (body parsed as JSON when possible)
//!     → ApiOutcome::ensure_success (non-2xx becomes LoopsError::Status)
//! ```
//!
//! # Security Constraints
//! - The API key is only sent in the `authorization` header
//! - Never log the API key or request payloads

pub mod client;
pub mod types;

pub use client::LoopsClient;
pub use types::{
    ApiOutcome, ContactUpsert, EventSend, LoopsError, LoopsResult, Operation, ResponseBody,
};

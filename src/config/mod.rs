//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overlay: LOOPS_API_KEY, ...)
//!     → validation.rs (presence and parse checks)
//!     → WorkerConfig (validated, immutable)
//!     → shared via Arc with the request handlers
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; no reload
//! - All fields have defaults to allow minimal configs
//! - Secrets are redacted from `Debug` output

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AttioConfig, ListenerConfig, LoopsConfig, ObservabilityConfig, TestSendConfig,
    TestSendTemplate, WorkerConfig,
};

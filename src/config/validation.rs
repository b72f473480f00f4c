//! Configuration validation.
//!
//! Presence checks for the values the routes cannot run without, plus
//! parse checks for addresses and URLs. All problems are reported at once.

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::WorkerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `loops.api_key`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate `config`, returning every problem found.
pub fn validate_config(config: &WorkerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.loops.api_key.trim().is_empty() {
        errors.push(ValidationError::new("loops.api_key", "is required (LOOPS_API_KEY)"));
    }
    if config.test_send.event_name.trim().is_empty() {
        errors.push(ValidationError::new(
            "test_send.event_name",
            "is required (LOOPS_EVENT_NAME)",
        ));
    }
    if config.test_send.default_email.trim().is_empty() {
        errors.push(ValidationError::new(
            "test_send.default_email",
            "is required (DEFAULT_TEST_EMAIL)",
        ));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    match Url::parse(&config.loops.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "loops.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("loops.base_url", e.to_string())),
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::new("timeouts.upstream_secs", "must be greater than 0"));
    } else if config.timeouts.request_secs <= config.timeouts.upstream_secs.saturating_mul(2) {
        // /send/test makes two sequential upstream calls.
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must exceed twice timeouts.upstream_secs ({})",
                config.timeouts.upstream_secs
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

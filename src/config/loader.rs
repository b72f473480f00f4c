//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::WorkerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, overlay the environment, and validate.
pub fn load_config(path: Option<&Path>) -> Result<WorkerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => WorkerConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document into a config without validating it.
pub fn parse_config(content: &str) -> Result<WorkerConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` returns the value of a variable, or `None` when unset. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut WorkerConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("LOOPS_API_KEY") {
        config.loops.api_key = v;
    }
    if let Some(v) = get("LOOPS_BASE_URL") {
        config.loops.base_url = v;
    }
    if let Some(v) = get("ATTIO_API_KEY") {
        config.attio.api_key = Some(v);
    }
    if let Some(v) = get("LOOPS_EVENT_NAME") {
        config.test_send.event_name = v;
    }
    if let Some(v) = get("DEFAULT_TEST_EMAIL") {
        config.test_send.default_email = v;
    }
    if let Some(v) = get("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = get("LOG_LEVEL") {
        config.observability.log_level = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = parse_config(
            r#"
            [loops]
            api_key = "from-file"

            [test_send]
            event_name = "file_event"
            default_email = "file@example.com"
            "#,
        )
        .unwrap();

        let vars = env(&[
            ("LOOPS_API_KEY", "from-env"),
            ("ATTIO_API_KEY", "attio"),
            ("DEFAULT_TEST_EMAIL", "env@example.com"),
        ]);
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.loops.api_key, "from-env");
        assert_eq!(config.attio.api_key.as_deref(), Some("attio"));
        assert_eq!(config.test_send.event_name, "file_event");
        assert_eq!(config.test_send.default_email, "env@example.com");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = WorkerConfig::default();
        config.test_send.event_name = "kept".into();

        let vars = env(&[("LOOPS_EVENT_NAME", "  "), ("ATTIO_API_KEY", "")]);
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.test_send.event_name, "kept");
        assert!(config.attio.api_key.is_none());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_config("listener = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/relay.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

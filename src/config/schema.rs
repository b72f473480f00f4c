//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root configuration for the marketing relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WorkerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub security: SecurityConfig,

    /// Contact-automation API (Loops) settings.
    pub loops: LoopsConfig,

    /// CRM (Attio) settings.
    pub attio: AttioConfig,

    /// Test-send workflow defaults and canned payload.
    pub test_send: TestSendConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// Timeout configuration for inbound and outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout for inbound requests, in seconds.
    /// Must exceed two upstream calls back to back.
    pub request_secs: u64,

    /// Timeout for each call to the contact-automation API, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 75,
            upstream_secs: 30,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Contact-automation API settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoopsConfig {
    /// Bearer token for the API. Environment: `LOOPS_API_KEY`.
    pub api_key: String,

    /// Base URL; endpoint paths are appended to it. Environment: `LOOPS_BASE_URL`.
    pub base_url: String,
}

impl Default for LoopsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://app.loops.so".to_string(),
        }
    }
}

impl fmt::Debug for LoopsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopsConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// CRM settings. The key is accepted but no route uses it yet.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AttioConfig {
    /// Environment: `ATTIO_API_KEY`.
    pub api_key: Option<String>,
}

impl fmt::Debug for AttioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttioConfig")
            .field("api_key", &self.api_key.as_deref().map(redact))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Defaults and canned payload for `POST /send/test`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TestSendConfig {
    /// Event name used when the request does not supply one. Environment: `LOOPS_EVENT_NAME`.
    pub event_name: String,

    /// Recipient used when the request does not supply one. Environment: `DEFAULT_TEST_EMAIL`.
    pub default_email: String,

    /// Contact fields and event properties sent with every test message.
    pub template: TestSendTemplate,
}

/// Canned marketing payload for a test send.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TestSendTemplate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subscribed: Option<bool>,

    /// Mailing list id → membership.
    pub mailing_lists: BTreeMap<String, bool>,

    pub user_group: Option<String>,
    pub source: Option<String>,

    /// Free-form properties attached to the event.
    pub event_properties: BTreeMap<String, Value>,
}

impl Default for TestSendTemplate {
    fn default() -> Self {
        let event_properties = [
            ("variant", "A"),
            ("sender_name", "Даниил из Лабпикс"),
            ("subject", "3 идеи по UI?"),
            ("body_opening", "Привет! Я Даниил из Лабпикс."),
            (
                "body_offer",
                "Увидел(а) ваш продукт — есть 3 быстрых идеи по UI (иерархия/поток/копирайт в интерфейсе).",
            ),
            ("body_question", "Ок, если пришлю одним письмом?"),
            ("goal", "reply_rate"),
            ("service", "design"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();

        Self {
            first_name: Some("Даниил".to_string()),
            last_name: None,
            subscribed: Some(true),
            mailing_lists: BTreeMap::from([("cmlhr4n2a0ap80iy25dtv4erc".to_string(), true)]),
            user_group: Some("lead_ui_audit_v1".to_string()),
            source: Some("labpics-marketing-worker".to_string()),
            event_properties,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). Environment: `LOG_LEVEL`.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: WorkerConfig = toml::from_str(
            r#"
            [loops]
            api_key = "k"

            [test_send]
            event_name = "welcome"
            "#,
        )
        .unwrap();

        assert_eq!(config.loops.api_key, "k");
        assert_eq!(config.loops.base_url, "https://app.loops.so");
        assert_eq!(config.test_send.event_name, "welcome");
        assert_eq!(config.test_send.template, TestSendTemplate::default());
        assert_eq!(config.listener.bind_address, "0.0.0.0:8787");
    }

    #[test]
    fn test_template_override() {
        let config: WorkerConfig = toml::from_str(
            r#"
            [test_send.template]
            first_name = "Ada"
            user_group = "beta"

            [test_send.template.mailing_lists]
            list_a = true
            list_b = false

            [test_send.template.event_properties]
            variant = "B"
            "#,
        )
        .unwrap();

        let template = &config.test_send.template;
        assert_eq!(template.first_name.as_deref(), Some("Ada"));
        assert_eq!(template.user_group.as_deref(), Some("beta"));
        assert_eq!(template.mailing_lists.len(), 2);
        assert!(!template.mailing_lists["list_b"]);
        assert_eq!(template.event_properties["variant"], "B");
        // Omitted fields keep the canned values; given maps replace them wholesale.
        assert_eq!(template.source.as_deref(), Some("labpics-marketing-worker"));
        assert!(!template.mailing_lists.contains_key("cmlhr4n2a0ap80iy25dtv4erc"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = WorkerConfig::default();
        config.loops.api_key = "super-secret".into();
        config.attio.api_key = Some("attio-secret".into());

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("attio-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

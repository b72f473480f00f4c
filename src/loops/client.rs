//! HTTP client for the contact-automation API.
//!
//! # Responsibilities
//! - POST fixed-shape JSON payloads with bearer authentication
//! - Read the response as text and interpret it leniently
//! - Report the outcome without deciding success (see [`ApiOutcome::ensure_success`])

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

use crate::config::LoopsConfig;
use crate::loops::types::{ApiOutcome, ContactUpsert, EventSend, LoopsError, LoopsResult, Operation};
use crate::observability::metrics;

/// Contact-automation API client. Cheap to clone; the connection pool is shared.
#[derive(Clone)]
pub struct LoopsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LoopsClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - API key and base URL
    /// * `timeout` - Per-request timeout
    pub fn new(config: &LoopsConfig, timeout: Duration) -> LoopsResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("marketing-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoopsError::Client(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Create or update a contact.
    pub async fn upsert_contact(&self, contact: &ContactUpsert) -> LoopsResult<ApiOutcome> {
        self.post(Operation::UpdateContact, contact).await
    }

    /// Fire a named event for a contact.
    pub async fn send_event(&self, event: &EventSend) -> LoopsResult<ApiOutcome> {
        self.post(Operation::SendEvent, event).await
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        operation: Operation,
        payload: &T,
    ) -> LoopsResult<ApiOutcome> {
        let url = format!("{}{}", self.base_url, operation.path());
        let start = Instant::now();

        let transport = |source| LoopsError::Transport { operation, source };

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(operation = operation.label(), error = %e, "Loops request failed");
                metrics::record_upstream_call(operation.label(), None);
                transport(e)
            })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport)?;
        metrics::record_upstream_call(operation.label(), Some(status));

        let outcome = ApiOutcome::new(operation, status, text);
        if outcome.is_success() {
            tracing::debug!(
                operation = operation.label(),
                status,
                latency_ms = start.elapsed().as_millis() as u64,
                "Loops call completed"
            );
        } else {
            tracing::warn!(
                operation = operation.label(),
                status,
                latency_ms = start.elapsed().as_millis() as u64,
                "Loops call returned non-success status"
            );
        }

        Ok(outcome)
    }
}

//! The canned "send test" workflow.
//!
//! Upserts the recipient with the template's contact fields, then fires the
//! lifecycle event with the template's properties. Both calls run in order;
//! the event is never sent if the upsert failed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::{TestSendConfig, TestSendTemplate};
use crate::http::body::BodyError;
use crate::loops::{ContactUpsert, EventSend, LoopsClient, LoopsResult, ResponseBody};

/// Caller-supplied overrides, taken from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSendRequest {
    pub email: Option<String>,
    pub event_name: Option<String>,
}

impl TestSendRequest {
    /// Pick `email` and `eventName` out of an arbitrary JSON body.
    ///
    /// Only non-empty strings count; any other value falls back to the defaults.
    /// A `null` body is rejected.
    pub fn from_body(body: &Value) -> Result<Self, BodyError> {
        if body.is_null() {
            return Err(BodyError::Null);
        }

        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            email: field("email"),
            event_name: field("eventName"),
        })
    }
}

/// Success envelope for `POST /send/test`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSendReport {
    pub ok: bool,
    pub email: String,
    pub event_name: String,
    pub idempotency_key: String,
    /// Body returned by the event-send call.
    pub result: ResponseBody,
}

/// `test:<email>:<ISO-8601 UTC timestamp, millisecond precision>`.
pub fn idempotency_key(email: &str, now: DateTime<Utc>) -> String {
    format!(
        "test:{email}:{}",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

fn contact_from_template(email: &str, template: &TestSendTemplate) -> ContactUpsert {
    ContactUpsert {
        email: email.to_string(),
        first_name: template.first_name.clone(),
        last_name: template.last_name.clone(),
        subscribed: template.subscribed,
        mailing_lists: Some(template.mailing_lists.clone()).filter(|m| !m.is_empty()),
        user_group: template.user_group.clone(),
        source: template.source.clone(),
    }
}

/// Run the workflow. Any remote failure aborts it with no partial result.
pub async fn run_test_send(
    client: &LoopsClient,
    settings: &TestSendConfig,
    request: TestSendRequest,
) -> LoopsResult<TestSendReport> {
    let email = request
        .email
        .unwrap_or_else(|| settings.default_email.clone());

    let contact = contact_from_template(&email, &settings.template);
    client.upsert_contact(&contact).await?.ensure_success()?;

    let event_name = request
        .event_name
        .unwrap_or_else(|| settings.event_name.clone());
    let idempotency_key = idempotency_key(&email, Utc::now());

    let event = EventSend {
        email: email.clone(),
        event_name: event_name.clone(),
        idempotency_key: Some(idempotency_key.clone()),
        event_properties: Some(settings.template.event_properties.clone())
            .filter(|p| !p.is_empty()),
    };
    let result = client.send_event(&event).await?.ensure_success()?;

    tracing::info!(event_name = %event_name, "Test send completed");

    Ok(TestSendReport {
        ok: true,
        email,
        event_name,
        idempotency_key,
        result,
    })
}

//! Payloads, outcomes, and errors for the contact-automation API.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Request body for the "update contact" endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpsert {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_lists: Option<BTreeMap<String, bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Request body for the "send event" endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSend {
    pub email: String,
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_properties: Option<BTreeMap<String, Value>>,
}

/// The two remote operations this relay performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    UpdateContact,
    SendEvent,
}

impl Operation {
    /// Endpoint path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Operation::UpdateContact => "/api/v1/contacts/update",
            Operation::SendEvent => "/api/v1/events/send",
        }
    }

    /// Short label for logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Operation::UpdateContact => "update_contact",
            Operation::SendEvent => "send_event",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::UpdateContact => f.write_str("update contact"),
            Operation::SendEvent => f.write_str("send event"),
        }
    }
}

/// Response body: parsed JSON when the text is valid JSON, otherwise the raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Interpret `text` leniently; parse failures keep the text as-is.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }
}

/// Result of one remote call, before success is decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiOutcome {
    pub operation: Operation,
    pub status: u16,
    /// Body exactly as received.
    pub raw: String,
    pub body: ResponseBody,
}

impl ApiOutcome {
    pub fn new(operation: Operation, status: u16, raw: String) -> Self {
        let body = ResponseBody::parse(raw.clone());
        Self {
            operation,
            status,
            raw,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert a non-2xx outcome into [`LoopsError::Status`]; otherwise yield the body.
    pub fn ensure_success(self) -> LoopsResult<ResponseBody> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(LoopsError::Status {
                operation: self.operation,
                status: self.status,
                body: self.raw,
            })
        }
    }
}

/// Errors that can occur when talking to the contact-automation API.
#[derive(Debug, Error)]
pub enum LoopsError {
    /// The remote answered with a non-2xx status.
    #[error("Loops {operation} failed: {status} {body}")]
    Status {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// Connection, timeout, or body read failure.
    #[error("Loops {operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Loops client configuration error: {0}")]
    Client(String),
}

/// Result type for contact-automation operations.
pub type LoopsResult<T> = Result<T, LoopsError>;

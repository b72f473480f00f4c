//! Marketing workflows composed from contact-automation calls.

pub mod test_send;

pub use test_send::{idempotency_key, run_test_send, TestSendReport, TestSendRequest};

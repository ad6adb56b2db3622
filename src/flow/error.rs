//! Error taxonomy for flow acquisition and submission, and the
//! classification of provider responses into it.
//!
//! Three tiers: a stale or rejected flow restarts from the entry path, an
//! HTTP 400 carrying an updated flow record re-renders with the provider's
//! field messages, and everything else surfaces on the page.

use crate::flow::types::FlowRecord;
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Debug)]
pub enum FlowError {
    /// The provider rejected the submission and returned an updated flow
    /// record carrying per-field messages.
    Validation(Box<FlowRecord>),
    /// The flow is expired, consumed, or otherwise unusable; a fresh one
    /// must be issued.
    Restart,
    /// The provider reports an already active session.
    AlreadyAuthenticated,
    /// Session synchronization after a completed flow failed.
    SessionSync(String),
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl fmt::Display for FlowError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::Validation(_) => {
                write!(formatter, "The submitted form contains invalid fields")
            }
            FlowError::Restart => write!(formatter, "The flow is no longer valid"),
            FlowError::AlreadyAuthenticated => {
                write!(formatter, "A session is already active")
            }
            FlowError::SessionSync(message) => {
                write!(formatter, "Session sync failed: {message}")
            }
            FlowError::Config(message) => write!(formatter, "Config error: {message}"),
            FlowError::Network(message) => write!(formatter, "Network error: {message}"),
            FlowError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            FlowError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            FlowError::Parse(message) => write!(formatter, "Response error: {message}"),
            FlowError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for FlowError {}

/// Error body shape used by the provider (`{"error": {"id": ...}}`).
#[derive(Deserialize)]
struct ProviderError {
    #[serde(default)]
    error: ProviderErrorDetails,
}

#[derive(Deserialize, Default)]
struct ProviderErrorDetails {
    #[serde(default)]
    id: String,
}

/// Classifies a non-2xx provider response body.
///
/// A 400 whose body is itself a flow record carries field validation
/// messages. An error body naming an already active session sends the user
/// home. Every other provider response means the flow cannot continue and a
/// fresh one must be issued.
pub fn classify_response(status: u16, body: &str) -> FlowError {
    if status == 400 {
        if let Ok(flow) = serde_json::from_str::<FlowRecord>(body) {
            return FlowError::Validation(Box::new(flow));
        }
    }

    if let Ok(provider_error) = serde_json::from_str::<ProviderError>(body) {
        if provider_error.error.id == "session_already_available" {
            return FlowError::AlreadyAuthenticated;
        }
    }

    FlowError::Restart
}

#[cfg(test)]
mod tests {
    use super::{classify_response, FlowError};
    use serde_json::json;

    #[test]
    fn bad_request_with_flow_body_is_a_validation_error() {
        let body = json!({
            "id": "flow-1",
            "ui": {
                "action": "https://kratos.example/self-service/login?flow=flow-1",
                "method": "POST",
                "nodes": [],
                "messages": [
                    { "id": 4000006, "text": "Invalid credentials.", "type": "error" }
                ]
            }
        })
        .to_string();

        match classify_response(400, &body) {
            FlowError::Validation(flow) => assert_eq!(flow.id, "flow-1"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn expired_flow_restarts() {
        let body = json!({
            "error": {
                "id": "self_service_flow_expired",
                "code": 410,
                "message": "The flow expired."
            }
        })
        .to_string();

        assert!(matches!(classify_response(410, &body), FlowError::Restart));
    }

    #[test]
    fn csrf_violation_restarts() {
        let body = json!({
            "error": { "id": "security_csrf_violation", "code": 400 }
        })
        .to_string();

        assert!(matches!(classify_response(400, &body), FlowError::Restart));
    }

    #[test]
    fn active_session_navigates_home() {
        let body = json!({
            "error": { "id": "session_already_available", "code": 400 }
        })
        .to_string();

        assert!(matches!(
            classify_response(400, &body),
            FlowError::AlreadyAuthenticated
        ));
    }

    #[test]
    fn opaque_server_errors_restart() {
        assert!(matches!(
            classify_response(500, "internal server error"),
            FlowError::Restart
        ));
        assert!(matches!(classify_response(404, ""), FlowError::Restart));
    }
}

//! HTTP helpers for the provider's JSON API with consistent timeouts and
//! error handling. Every request includes credentials so the browser's flow
//! and session cookies travel along; flow responses route non-2xx statuses
//! through the flow error classification.

use crate::flow::error::{classify_response, FlowError};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::to_string;
use web_sys::{AbortController, RequestCredentials};

/// Default request timeout (milliseconds) applied to all HTTP helpers.
const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Upper bound on error body text carried into error messages.
const MAX_ERROR_CHARS: usize = 256;

/// Fetches JSON with cookies from the provider.
pub async fn get_json_with_credentials<T: DeserializeOwned>(url: &str) -> Result<T, FlowError> {
    let response = send_with_timeout(|signal| {
        Request::get(url)
            .header("Accept", "application/json")
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal))
            .build()
            .map_err(|err| FlowError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Posts JSON with cookies and parses a JSON response.
pub async fn post_json_with_credentials<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, FlowError> {
    let payload = to_string(body)
        .map_err(|err| FlowError::Serialization(format!("Failed to encode request: {err}")))?;
    let response = send_with_timeout(move |signal| {
        Request::post(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal))
            .body(payload)
            .map_err(|err| FlowError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Fetches JSON with cookies and returns `None` on 204 or 401, used for
/// session lookups where "no session" is a normal answer.
pub async fn get_optional_json_with_credentials<T: DeserializeOwned>(
    url: &str,
) -> Result<Option<T>, FlowError> {
    let response = send_with_timeout(|signal| {
        Request::get(url)
            .header("Accept", "application/json")
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal))
            .build()
            .map_err(|err| FlowError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    if response.status() == 204 || response.status() == 401 {
        return Ok(None);
    }
    if response.ok() {
        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|err| FlowError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(FlowError::Http {
            status,
            message: sanitize_body(&body),
        })
    }
}

/// Truncates error bodies before they end up in messages or logs.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_ERROR_CHARS {
        let mut truncated: String = trimmed.chars().take(MAX_ERROR_CHARS).collect();
        truncated.push('…');
        truncated
    } else {
        trimmed.to_string()
    }
}

/// Maps network errors into user-facing variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> FlowError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        FlowError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        FlowError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sends a request with an abort timeout to avoid hanging UI state.
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<gloo_net::http::Request, FlowError>,
) -> Result<gloo_net::http::Response, FlowError> {
    let controller = AbortController::new()
        .map_err(|_| FlowError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

/// Parses JSON responses; non-2xx responses go through the flow error
/// classification (validation, restart, already authenticated).
async fn handle_json_response<T: DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<T, FlowError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| FlowError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(classify_response(status, &body))
    }
}

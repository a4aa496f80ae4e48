//! Error types surfaced to the UI.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures collapse into [`ApiError`] so pages only distinguish the
//! one uniformly handled signal (401, which forces logout) from everything
//! else (a transient notice). [`ValidationError`] blocks a submission before
//! any request is made.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Failure of a backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Credential missing, expired or rejected (HTTP 401).
    #[error("unauthorized")]
    Unauthorized { detail: Option<String> },
    /// Any other non-2xx response.
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = detail_from_body(body);
        if status == 401 {
            Self::Unauthorized { detail }
        } else {
            Self::Status { status, detail }
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Backend-provided message, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Status { detail, .. } => detail.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Message for a notice: the backend detail when present, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_owned()
    }
}

/// Extract the `detail` field of an error body.
///
/// Accepts a plain string or a validation list whose first entry carries `msg`.
#[must_use]
pub fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_owned),
        _ => None,
    }
}

/// Turn a status and raw body into the decoded payload or an [`ApiError`].
///
/// An empty 2xx body decodes as JSON `null`.
///
/// # Errors
///
/// Returns [`ApiError::from_response`] for non-2xx statuses and
/// [`ApiError::Decode`] when the body does not match `T`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, body));
    }
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Client-side form validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please use a stronger password")]
    WeakPassword,
    #[error("Please enter a valid amount")]
    InvalidAmount,
}

//! API error taxonomy and backend message extraction

use serde_json::Value;
use std::fmt;

/// Errors surfaced by [`super::ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Login rejected (bad credentials or malformed login)
    Auth(String),
    /// Registration rejected by the backend
    Validation(String),
    /// Any other non-2xx response
    Rejected { status: u16, message: String },
    /// Request could not complete (connection refused, DNS, reset)
    Network(String),
    /// 2xx response whose body was not what the contract promises
    Decode(String),
}

impl ApiError {
    /// Backend-supplied message, if the backend answered at all
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Auth(msg) | Self::Validation(msg) => Some(msg),
            Self::Rejected { message, .. } => Some(message),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Text for inline display: the backend message verbatim, otherwise the
    /// caller's generic fallback ("Login failed", ...)
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            Self::Validation(msg) => write!(f, "Registration rejected: {}", msg),
            Self::Rejected { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::Network(msg) => write!(f, "Operation failed: {}", msg),
            Self::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Pull the human-readable message out of an error body.
///
/// FastAPI-style backends answer `{"detail": "..."}`, or for request
/// validation `{"detail": [{"msg": "..."}, ...]}`. Anything else falls back
/// to a `message` field, then the raw body, then the status reason.
pub fn extract_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match json.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(Value::Array(items)) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !msgs.is_empty() {
                    return msgs.join("; ");
                }
            }
            _ => {}
        }
        if let Some(Value::String(message)) = json.get("message") {
            return message.clone();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Request failed")
        .to_string()
}

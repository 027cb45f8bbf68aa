//! Error types for the PromptWiz client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code used when the service response could not be parsed.
pub const UNKNOWN_RESPONSE: &str = "UNKNOWN_RESPONSE";

/// Client errors.
///
/// Errors reported by the service are not represented here; they are
/// returned in-band as [`ServiceError`] entries.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// API version outside the supported set.
    #[error("unsupported PromptWiz API version: {version}")]
    UnsupportedApiVersion { version: String },

    /// Network error (DNS, connection, reading the body).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The request deadline elapsed.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ClientError {
    /// Whether the request failed at the transport level.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            Self::Config {
                message: format!("invalid request: {}", err),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// An error entry reported by the service (or synthesized by the client).
///
/// The entry is kept exactly as received and serializes back unchanged.
/// `code` and `description` are read from it leniently: missing or `null`
/// fields are empty, non-string values use their JSON text, and an entry
/// that is a bare string becomes the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct ServiceError {
    /// Machine-readable error code.
    pub code: String,

    /// Human-readable description.
    pub description: String,

    raw: Value,
}

impl ServiceError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        let code = code.into();
        let description = description.into();
        let raw = serde_json::json!({ "code": code, "description": description });
        Self {
            code,
            description,
            raw,
        }
    }

    /// Synthetic entry for a response body that could not be parsed.
    pub fn unknown_response(reason: impl std::fmt::Display, body: &str) -> Self {
        Self::new(
            UNKNOWN_RESPONSE,
            format!("Could not parse the response: {}\n{}", reason, body),
        )
    }

    pub fn is_unknown_response(&self) -> bool {
        self.code == UNKNOWN_RESPONSE
    }

    /// The entry as sent by the service.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

fn lenient_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl From<Value> for ServiceError {
    fn from(raw: Value) -> Self {
        let (code, description) = match &raw {
            Value::Object(entry) => (
                lenient_text(entry.get("code")),
                lenient_text(entry.get("description")),
            ),
            other => (String::new(), lenient_text(Some(other))),
        };
        Self {
            code,
            description,
            raw,
        }
    }
}

impl From<ServiceError> for Value {
    fn from(err: ServiceError) -> Self {
        err.raw
    }
}

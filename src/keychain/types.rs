//! Wallet request/response types and outcome classification.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::json::is_truthy;

/// `error` value the wallet reports when the user declines a request.
pub const USER_CANCEL: &str = "user_cancel";

/// Capabilities exposed by the wallet extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeychainMethod {
    RequestTransfer,
    RequestCustomJson,
}

impl KeychainMethod {
    /// Capability name on the extension object.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeychainMethod::RequestTransfer => "requestTransfer",
            KeychainMethod::RequestCustomJson => "requestCustomJson",
        }
    }
}

impl std::fmt::Display for KeychainMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that indicate a programming error rather than a wallet outcome.
#[derive(Debug, Error)]
pub enum KeychainError {
    /// The wallet does not expose the requested capability.
    #[error("Wallet does not support '{0}'")]
    UnsupportedMethod(KeychainMethod),

    /// The wallet released the callback without ever invoking it.
    #[error("Wallet dropped the '{0}' callback without responding")]
    CallbackDropped(KeychainMethod),
}

/// Raw response object passed to the wallet callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeychainResponse(Map<String, Value>);

impl KeychainResponse {
    /// Wrap a callback payload. Anything other than an object is treated as an empty response.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            other => {
                tracing::warn!(payload = %other, "Wallet responded with a non-object payload");
                Self::default()
            }
        }
    }

    /// Truthiness of the `success` field.
    pub fn success(&self) -> bool {
        self.0.get("success").map(is_truthy).unwrap_or(false)
    }

    /// The `error` field, when it is a string.
    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    pub fn is_user_cancel(&self) -> bool {
        self.error() == Some(USER_CANCEL)
    }

    /// Human readable `message` field, when present.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Three-way classification of a wallet response.
#[derive(Debug, Clone, PartialEq)]
pub enum KeychainOutcome {
    Success(KeychainResponse),
    Cancelled(KeychainResponse),
    Failed(KeychainResponse),
}

impl KeychainOutcome {
    /// Classify a response. A user cancel wins over any `success` flag.
    pub fn classify(response: KeychainResponse) -> Self {
        if response.is_user_cancel() {
            KeychainOutcome::Cancelled(response)
        } else if response.success() {
            KeychainOutcome::Success(response)
        } else {
            KeychainOutcome::Failed(response)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, KeychainOutcome::Success(_))
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, KeychainOutcome::Cancelled(_))
    }

    /// Label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            KeychainOutcome::Success(_) => "success",
            KeychainOutcome::Cancelled(_) => "cancel",
            KeychainOutcome::Failed(_) => "failure",
        }
    }

    pub fn response(&self) -> &KeychainResponse {
        match self {
            KeychainOutcome::Success(r) | KeychainOutcome::Cancelled(r) | KeychainOutcome::Failed(r) => r,
        }
    }

    pub fn into_response(self) -> KeychainResponse {
        match self {
            KeychainOutcome::Success(r) | KeychainOutcome::Cancelled(r) | KeychainOutcome::Failed(r) => r,
        }
    }
}

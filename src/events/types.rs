//! Event variants and their wire names.

use serde_json::{json, Value};

use crate::broadcast::BroadcastResult;
use crate::confirmation::ValidationResult;

pub const BROADCAST_AWAITING: &str = "broadcast-awaiting";
pub const BROADCAST_SUCCESS: &str = "broadcast-success";
pub const BROADCAST_DONE: &str = "broadcast-done";
pub const TRANSACTION_VALIDATED: &str = "transaction-validated";

/// A lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A broadcast request is in flight.
    BroadcastAwaiting,
    /// The wallet accepted a broadcast. `name` is `broadcast-success` unless the
    /// caller asked for another event name.
    BroadcastSuccess { name: String, result: BroadcastResult },
    /// A broadcast request finished, whatever its outcome.
    BroadcastDone,
    /// The confirmation poller reached a terminal state.
    TransactionValidated(ValidationResult),
}

impl Event {
    /// Success event on the default name, or on `name` when given.
    pub fn success(name: Option<&str>, result: BroadcastResult) -> Self {
        Event::BroadcastSuccess {
            name: name.unwrap_or(BROADCAST_SUCCESS).to_string(),
            result,
        }
    }

    /// Name listeners subscribe to.
    pub fn name(&self) -> &str {
        match self {
            Event::BroadcastAwaiting => BROADCAST_AWAITING,
            Event::BroadcastSuccess { name, .. } => name.as_str(),
            Event::BroadcastDone => BROADCAST_DONE,
            Event::TransactionValidated(_) => TRANSACTION_VALIDATED,
        }
    }

    /// Payload as JSON, `null` for events without one.
    pub fn payload(&self) -> Value {
        match self {
            Event::BroadcastAwaiting | Event::BroadcastDone => Value::Null,
            Event::BroadcastSuccess { result, .. } => result.to_json(),
            Event::TransactionValidated(result) => {
                serde_json::to_value(result).unwrap_or(Value::Null)
            }
        }
    }

    /// `{"event": name, "payload": payload}` envelope used by the CLI.
    pub fn to_json(&self) -> Value {
        json!({ "event": self.name(), "payload": self.payload() })
    }
}

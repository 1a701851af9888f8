//! Broadcast request and result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::json::is_truthy;
use crate::keychain::KeychainResponse;

/// Authority a custom JSON operation is signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyType {
    #[default]
    Active,
    Posting,
    Memo,
}

impl KeyType {
    /// Name the wallet expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Active => "Active",
            KeyType::Posting => "Posting",
            KeyType::Memo => "Memo",
        }
    }
}

/// A token or native-currency transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Recipient account.
    pub to: String,
    /// Amount as the wallet expects it, e.g. `"1.000"`.
    pub amount: String,
    /// Currency or token symbol.
    pub currency: String,
    #[serde(default)]
    pub memo: String,
    /// Event to publish on success instead of `broadcast-success`.
    #[serde(default)]
    pub event_name: Option<String>,
}

/// A custom JSON operation carrying a batch of sidechain sub-operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomJsonRequest {
    /// Signing authority. Falls back to the broadcaster's default (Active).
    #[serde(default)]
    pub key: Option<KeyType>,
    /// Custom JSON id. Falls back to the sidechain id from settings.
    #[serde(default)]
    pub id: Option<String>,
    /// Text shown to the user in the wallet prompt.
    #[serde(default)]
    pub message: String,
    /// Sub-operations, serialized to a string before being sent.
    pub json: Vec<Value>,
    /// Event to publish on success instead of `broadcast-success`.
    #[serde(default)]
    pub event_name: Option<String>,
}

/// Normalised payload of a successful broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastResult {
    /// Transaction id, taken from `id` or else `tx_id`.
    pub id: Option<String>,
    /// Number of sub-operations (custom JSON only).
    pub ntrx: Option<usize>,
    /// Remaining fields, forwarded untouched.
    pub fields: Map<String, Value>,
}

impl BroadcastResult {
    /// Build from a wallet response. The wallet nests the broadcast under `result`;
    /// a flat response is used as-is.
    pub fn from_keychain(response: &KeychainResponse) -> Self {
        match response.get("result") {
            Some(Value::Object(nested)) => Self::from_fields(nested.clone()),
            _ => Self::from_fields(response.as_map().clone()),
        }
    }

    /// Build from a result object, normalising `id`.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        let id = fields
            .remove("id")
            .filter(is_truthy)
            .or_else(|| fields.get("tx_id").cloned())
            .and_then(|v| id_string(&v));

        Self {
            id,
            ntrx: None,
            fields,
        }
    }

    /// Attach the sub-operation count, replacing any `ntrx` the wallet returned.
    pub fn with_ntrx(mut self, ntrx: usize) -> Self {
        self.fields.remove("ntrx");
        self.ntrx = Some(ntrx);
        self
    }

    /// Payload as listeners receive it.
    pub fn to_json(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert(
            "id".to_string(),
            self.id.clone().map(Value::String).unwrap_or(Value::Null),
        );
        if let Some(ntrx) = self.ntrx {
            map.insert("ntrx".to_string(), Value::from(ntrx));
        }
        Value::Object(map)
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

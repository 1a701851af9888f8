//! Ledger types and error definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while querying the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// Response body did not have the expected shape.
    #[error("Malformed RPC response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// A transaction as recorded by the sidechain once processed.
///
/// Only the fields that drive validation are decoded; block metadata is ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerTransaction {
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    /// JSON-encoded operation payload.
    #[serde(default)]
    pub payload: Option<String>,
    /// JSON-encoded execution logs (`{"errors": [...], "events": [...]}`).
    #[serde(default)]
    pub logs: Option<String>,
}

/// Query interface to the ledger.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Look up a transaction. `Ok(None)` means not (yet) processed.
    async fn get_transaction(&self, trx_id: &str) -> LedgerResult<Option<LedgerTransaction>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_deserialize() {
        let trx: LedgerTransaction = serde_json::from_value(json!({
            "blockNumber": 12,
            "refHiveBlockNumber": 70000000,
            "transactionId": "abc",
            "sender": "alice",
            "contract": "market",
            "action": "buy",
            "payload": "{\"symbol\":\"BEE\"}",
            "logs": "{}",
            "hash": "ff",
        }))
        .unwrap();

        assert_eq!(trx.contract.as_deref(), Some("market"));
        assert_eq!(trx.payload.as_deref(), Some("{\"symbol\":\"BEE\"}"));
    }

    #[test]
    fn test_block_metadata_types_do_not_matter() {
        let trx: LedgerTransaction = serde_json::from_value(json!({
            "blockNumber": "12",
            "transactionId": 7,
            "sender": {"name": "alice"},
            "contract": "tokens",
            "action": "transfer",
            "logs": "{}",
        }))
        .unwrap();
        assert_eq!(trx.contract.as_deref(), Some("tokens"));
        assert_eq!(trx.action.as_deref(), Some("transfer"));
    }

    #[test]
    fn test_null_fields_tolerated() {
        let trx: LedgerTransaction =
            serde_json::from_value(json!({"contract": "tokens", "logs": null})).unwrap();
        assert_eq!(trx.logs, None);
        assert_eq!(trx.action, None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(LedgerError::Timeout(10).to_string(), "RPC timeout after 10 seconds");
        assert_eq!(LedgerError::Status(502).to_string(), "Unexpected HTTP status 502");
    }
}

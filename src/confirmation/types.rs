//! Validation result published once polling ends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::json::{field_is_truthy, parse_json_or_empty};
use crate::ledger::LedgerTransaction;

/// Payload of `transaction-validated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub trx_id: String,
    pub contract: Option<String>,
    pub action: Option<String>,
    /// Decoded operation payload; `{}` when the ledger stored something undecodable.
    pub payload: Option<Value>,
    /// True iff the decoded logs carry a truthy `errors` field.
    pub error: bool,
}

impl ValidationResult {
    /// Result for a transaction the ledger processed.
    pub fn from_transaction(trx_id: &str, trx: &LedgerTransaction) -> Self {
        let logs = parse_json_or_empty(trx.logs.as_deref().unwrap_or_default());
        let payload = parse_json_or_empty(trx.payload.as_deref().unwrap_or_default());

        Self {
            trx_id: trx_id.to_string(),
            contract: trx.contract.clone(),
            action: trx.action.clone(),
            payload: Some(payload),
            error: field_is_truthy(&logs, "errors"),
        }
    }

    /// Result for a transaction never seen within the attempt budget.
    pub fn not_found(trx_id: &str) -> Self {
        Self {
            trx_id: trx_id.to_string(),
            contract: None,
            action: None,
            payload: None,
            error: false,
        }
    }

    /// Label used in logs and metrics.
    pub fn status(&self) -> &'static str {
        match (self.contract.is_some() || self.payload.is_some(), self.error) {
            (_, true) => "error",
            (true, false) => "ok",
            (false, false) => "not_found",
        }
    }
}

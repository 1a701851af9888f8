//! Sidechain JSON-RPC client with timeout and failover.
//!
//! # Responsibilities
//! - POST `getTransactionInfo` to `{rpc_url}/blockchain`
//! - Try failover endpoints in order when one errors or times out
//! - Map `result: null` (or an empty record) to "not found"

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::timeout;
use url::Url;

use crate::config::LedgerConfig;
use crate::ledger::types::{Ledger, LedgerError, LedgerResult, LedgerTransaction};

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Sidechain ledger client.
#[derive(Clone)]
pub struct SidechainClient {
    /// Blockchain endpoints (primary + failovers).
    endpoints: Vec<Url>,
    http: reqwest::Client,
    config: LedgerConfig,
    timeout_duration: Duration,
}

impl SidechainClient {
    /// Create a client. Fails only on an invalid primary URL.
    pub fn new(config: LedgerConfig) -> LedgerResult<Self> {
        let timeout_duration = Duration::from_secs(config.timeout_secs);
        let mut endpoints = Vec::new();

        endpoints.push(blockchain_endpoint(&config.rpc_url).ok_or_else(|| {
            LedgerError::Rpc(format!("Invalid RPC URL '{}'", config.rpc_url))
        })?);

        for url_str in &config.failover_urls {
            match blockchain_endpoint(url_str) {
                Some(url) => endpoints.push(url),
                None => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        tracing::debug!(endpoints = endpoints.len(), "Sidechain client initialized");

        Ok(Self {
            endpoints,
            http: reqwest::Client::new(),
            config,
            timeout_duration,
        })
    }

    /// Call a JSON-RPC method, trying each endpoint until one answers.
    pub async fn call(&self, method: &str, params: Value) -> LedgerResult<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let mut last_error = None;
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            match timeout(self.timeout_duration, self.post(endpoint, &body)).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(endpoint_idx = i, method, error = %e, "RPC error, trying next endpoint");
                    last_error = Some(e);
                }
                Err(_) => {
                    tracing::warn!(endpoint_idx = i, method, "RPC timeout, trying next endpoint");
                    last_error = Some(LedgerError::Timeout(self.config.timeout_secs));
                }
            }
        }

        Err(LedgerError::Rpc(format!(
            "All ledger endpoints failed: {}",
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    async fn post(&self, endpoint: &Url, body: &Value) -> LedgerResult<Value> {
        let res = self.http.post(endpoint.clone()).json(body).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(LedgerError::Status(status.as_u16()));
        }

        let rpc: RpcResponse = serde_json::from_slice(&res.bytes().await?)?;
        if let Some(err) = rpc.error {
            return Err(LedgerError::Rpc(format!("{} (code {})", err.message, err.code)));
        }
        Ok(rpc.result)
    }
}

#[async_trait]
impl Ledger for SidechainClient {
    async fn get_transaction(&self, trx_id: &str) -> LedgerResult<Option<LedgerTransaction>> {
        let result = self
            .call("getTransactionInfo", json!({ "txid": trx_id }))
            .await?;

        match result {
            Value::Null => Ok(None),
            Value::Object(ref map) if map.is_empty() => Ok(None),
            other => Ok(Some(serde_json::from_value(other)?)),
        }
    }
}

impl std::fmt::Debug for SidechainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SidechainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("endpoints", &self.endpoints.len())
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}

fn blockchain_endpoint(base: &str) -> Option<Url> {
    Url::parse(&format!("{}/blockchain", base.trim_end_matches('/'))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LedgerConfig {
        LedgerConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            failover_urls: Vec::new(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn test_endpoint_construction() {
        let url = blockchain_endpoint("https://api.hive-engine.com/rpc/").unwrap();
        assert_eq!(url.as_str(), "https://api.hive-engine.com/rpc/blockchain");
        assert!(blockchain_endpoint("not a url").is_none());
    }

    #[test]
    fn test_invalid_primary_url() {
        let mut config = test_config();
        config.rpc_url = "::".to_string();
        let err = SidechainClient::new(config).unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[test]
    fn test_invalid_failover_is_skipped() {
        let mut config = test_config();
        config.failover_urls = vec!["::".to_string(), "http://127.0.0.1:2".to_string()];
        let client = SidechainClient::new(config).unwrap();
        assert_eq!(client.endpoints.len(), 2);
    }

    #[tokio::test]
    async fn test_all_endpoints_failing() {
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        let client = SidechainClient::new(config).unwrap();

        let err = client.get_transaction("abc").await.unwrap_err();
        assert!(err.to_string().contains("All ledger endpoints failed"));
    }
}

//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::broadcast::KeyType;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Sidechain ledger endpoints.
    pub ledger: LedgerConfig,

    /// Transaction confirmation polling.
    pub confirmation: ConfirmationConfig,

    /// Settings and price endpoints.
    pub market: MarketConfig,

    /// Broadcast defaults.
    pub broadcast: BroadcastConfig,

    /// Event bus sizing.
    pub events: EventsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Sidechain ledger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC base URL (the `/blockchain` endpoint is appended).
    pub rpc_url: String,

    /// Failover JSON-RPC base URLs, tried in order.
    pub failover_urls: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.hive-engine.com/rpc".to_string(),
            failover_urls: Vec::new(),
            timeout_secs: 10,
        }
    }
}

/// Confirmation poller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Fixed delay before each ledger query, in seconds.
    pub poll_interval_secs: u64,

    /// Number of ledger queries before giving up.
    pub max_attempts: u32,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            max_attempts: 5,
        }
    }
}

/// Market data endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Exchange API base URL (`/settings` is appended).
    pub api_url: String,

    /// Price feed URL.
    pub price_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_url: "https://info-api.tribaldex.com".to_string(),
            price_url: "https://prices.splinterlands.com/prices".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Broadcast defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Authority used for custom JSON when the caller does not choose one.
    pub default_key: KeyType,

    /// Account to broadcast as, if known up front.
    pub username: Option<String>,
}

/// Event bus configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Events buffered per subscriber.
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: crate::events::bus::DEFAULT_CAPACITY,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.confirmation.poll_interval_secs, 10);
        assert_eq!(config.confirmation.max_attempts, 5);
        assert_eq!(config.broadcast.default_key, KeyType::Active);
        assert!(config.broadcast.username.is_none());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [confirmation]
            max_attempts = 8

            [broadcast]
            default_key = "Posting"
            username = "alice"
            "#,
        )
        .unwrap();

        assert_eq!(config.confirmation.max_attempts, 8);
        assert_eq!(config.confirmation.poll_interval_secs, 10);
        assert_eq!(config.broadcast.default_key, KeyType::Posting);
        assert_eq!(config.broadcast.username.as_deref(), Some("alice"));
        assert_eq!(config.ledger.rpc_url, "https://api.hive-engine.com/rpc");
    }
}

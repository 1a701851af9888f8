//! HTTP fetchers for exchange settings and the HIVE price.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::MarketConfig;
use crate::market::state::{MarketState, Settings};

/// Errors from a single fetch. Never escape `fetch_*`.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    hive: f64,
}

/// Populates `MarketState` from the exchange API and price feed.
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    config: MarketConfig,
    state: Arc<MarketState>,
}

impl MarketClient {
    pub fn new(config: MarketConfig, state: Arc<MarketState>) -> Result<Self, MarketError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config, state })
    }

    pub fn state(&self) -> &Arc<MarketState> {
        &self.state
    }

    /// Refresh settings. On failure the previous settings are kept.
    pub async fn fetch_settings(&self) {
        match self.get_settings().await {
            Ok(settings) => {
                tracing::info!(sidechain_id = %settings.sidechain_id, "Settings loaded");
                self.state.set_settings(settings);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring settings fetch failure"),
        }
    }

    /// Refresh the HIVE price. On failure the previous price is kept.
    pub async fn fetch_hive_price(&self) {
        match self.get_hive_price().await {
            Ok(price) => {
                tracing::debug!(price, "HIVE price updated");
                self.state.set_hive_price(price);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring price fetch failure"),
        }
    }

    async fn get_settings(&self) -> Result<Settings, MarketError> {
        let url = format!("{}/settings", self.config.api_url.trim_end_matches('/'));
        self.get_json(&url).await
    }

    async fn get_hive_price(&self) -> Result<f64, MarketError> {
        let response: PriceResponse = self.get_json(&self.config.price_url).await?;
        Ok(response.hive)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, MarketError> {
        let res = self.http.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(MarketError::Status(status.as_u16()));
        }
        Ok(res.json().await?)
    }
}

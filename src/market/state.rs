//! Shared market state.

use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Exchange settings as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Custom JSON id the sidechain listens on.
    pub sidechain_id: String,

    /// Everything else the API returns.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings, HIVE price and current account, each swapped atomically.
#[derive(Debug)]
pub struct MarketState {
    settings: ArcSwapOption<Settings>,
    hive_price: ArcSwap<f64>,
    username: ArcSwapOption<String>,
}

impl MarketState {
    pub fn new() -> Self {
        Self {
            settings: ArcSwapOption::empty(),
            hive_price: ArcSwap::from_pointee(0.0),
            username: ArcSwapOption::empty(),
        }
    }

    pub fn settings(&self) -> Option<Arc<Settings>> {
        self.settings.load_full()
    }

    pub fn set_settings(&self, settings: Settings) {
        self.settings.store(Some(Arc::new(settings)));
    }

    /// Default custom JSON id, if settings have been loaded.
    pub fn sidechain_id(&self) -> Option<String> {
        self.settings.load().as_ref().map(|s| s.sidechain_id.clone())
    }

    pub fn hive_price(&self) -> f64 {
        **self.hive_price.load()
    }

    pub fn set_hive_price(&self, price: f64) {
        self.hive_price.store(Arc::new(price));
    }

    pub fn username(&self) -> Option<String> {
        self.username.load().as_deref().cloned()
    }

    pub fn set_username(&self, username: Option<String>) {
        self.username.store(username.map(Arc::new));
    }
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new()
    }
}

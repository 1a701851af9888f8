//! Transfer and custom JSON broadcast flows.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::broadcast::types::{BroadcastResult, CustomJsonRequest, KeyType, TransferRequest};
use crate::config::BroadcastConfig;
use crate::events::{Event, EventBus};
use crate::keychain::{KeychainBridge, KeychainError, KeychainMethod, KeychainOutcome};
use crate::market::MarketState;

/// Programming errors surfaced by a broadcast. Wallet failures and cancels are not errors.
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error(transparent)]
    Keychain(#[from] KeychainError),

    #[error("Failed to serialize custom JSON payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No custom JSON id given and settings carry no sidechain id")]
    MissingSidechainId,
}

/// Submits broadcasts through the wallet and republishes their outcome as events.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    bridge: KeychainBridge,
    bus: EventBus,
    state: Arc<MarketState>,
    default_key: KeyType,
}

impl Broadcaster {
    pub fn new(bridge: KeychainBridge, bus: EventBus, state: Arc<MarketState>) -> Self {
        Self {
            bridge,
            bus,
            state,
            default_key: KeyType::default(),
        }
    }

    /// Build from the `[broadcast]` config section, seeding the current account.
    pub fn from_config(
        bridge: KeychainBridge,
        bus: EventBus,
        state: Arc<MarketState>,
        config: &BroadcastConfig,
    ) -> Self {
        if config.username.is_some() {
            state.set_username(config.username.clone());
        }
        Self::new(bridge, bus, state).with_default_key(config.default_key)
    }

    /// Authority used for custom JSON requests that do not pick one.
    pub fn with_default_key(mut self, key: KeyType) -> Self {
        self.default_key = key;
        self
    }

    /// Request a transfer: `[username, to, amount, memo, currency]`.
    pub async fn request_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<KeychainOutcome, BroadcastError> {
        let args = vec![
            self.username(),
            json!(request.to),
            json!(request.amount),
            json!(request.memo),
            json!(request.currency),
        ];

        self.broadcast(
            KeychainMethod::RequestTransfer,
            args,
            request.event_name.as_deref(),
            None,
        )
        .await
    }

    /// Request a custom JSON broadcast: `[username, id, key, json, message]`.
    ///
    /// An absent or empty `id` falls back to the sidechain id from settings.
    ///
    /// The success payload carries `ntrx`, the number of sub-operations in `request.json`.
    pub async fn request_custom_json(
        &self,
        request: CustomJsonRequest,
    ) -> Result<KeychainOutcome, BroadcastError> {
        let id = match request.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => self
                .state
                .sidechain_id()
                .ok_or(BroadcastError::MissingSidechainId)?,
        };
        let key = request.key.unwrap_or(self.default_key);
        let payload = serde_json::to_string(&request.json)?;

        let args = vec![
            self.username(),
            json!(id),
            json!(key.as_str()),
            Value::String(payload),
            json!(request.message),
        ];

        self.broadcast(
            KeychainMethod::RequestCustomJson,
            args,
            request.event_name.as_deref(),
            Some(request.json.len()),
        )
        .await
    }

    fn username(&self) -> Value {
        self.state.username().map(Value::String).unwrap_or(Value::Null)
    }

    async fn broadcast(
        &self,
        method: KeychainMethod,
        args: Vec<Value>,
        event_name: Option<&str>,
        ntrx: Option<usize>,
    ) -> Result<KeychainOutcome, BroadcastError> {
        let span = tracing::info_span!("broadcast", request_id = %Uuid::new_v4(), method = %method);

        async move {
            self.bus.publish(Event::BroadcastAwaiting);

            let outcome = self.bridge.request(method, args).await;

            if let Ok(KeychainOutcome::Success(response)) = &outcome {
                let mut result = BroadcastResult::from_keychain(response);
                if let Some(ntrx) = ntrx {
                    result = result.with_ntrx(ntrx);
                }
                tracing::info!(trx_id = result.id.as_deref().unwrap_or(""), "Broadcast accepted");
                self.bus.publish(Event::success(event_name, result));
            }

            self.bus.publish(Event::BroadcastDone);

            outcome.map_err(BroadcastError::from)
        }
        .instrument(span)
        .await
    }
}

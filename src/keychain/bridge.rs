//! Callback-to-future bridge over the wallet extension.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::oneshot;

use crate::keychain::types::{KeychainError, KeychainMethod, KeychainOutcome, KeychainResponse};
use crate::observability::metrics;

/// Completion callback handed to the wallet. Invoked at most once.
pub type KeychainCallback = Box<dyn FnOnce(Value) + Send + 'static>;

/// The wallet extension's capability surface.
///
/// `call` starts the request and returns immediately; the wallet later invokes
/// `callback` exactly once with its response object.
pub trait Keychain: Send + Sync {
    fn call(
        &self,
        method: KeychainMethod,
        args: Vec<Value>,
        callback: KeychainCallback,
    ) -> Result<(), KeychainError>;
}

/// Turns a wallet call into a single awaitable outcome.
#[derive(Clone)]
pub struct KeychainBridge {
    keychain: Arc<dyn Keychain>,
}

impl KeychainBridge {
    pub fn new(keychain: Arc<dyn Keychain>) -> Self {
        Self { keychain }
    }

    /// Invoke `method` with `args` and wait for the wallet to answer.
    ///
    /// There is no timeout: a wallet that never answers suspends the caller indefinitely.
    pub async fn request(
        &self,
        method: KeychainMethod,
        args: Vec<Value>,
    ) -> Result<KeychainOutcome, KeychainError> {
        let (tx, rx) = oneshot::channel();
        let callback: KeychainCallback = Box::new(move |raw| {
            let _ = tx.send(raw);
        });

        tracing::debug!(method = %method, args = args.len(), "Requesting wallet capability");
        self.keychain.call(method, args, callback)?;

        let raw = rx.await.map_err(|_| KeychainError::CallbackDropped(method))?;
        let outcome = KeychainOutcome::classify(KeychainResponse::from_value(raw));

        metrics::record_keychain_request(method.as_str(), outcome.label());
        tracing::info!(
            method = %method,
            outcome = outcome.label(),
            error = outcome.response().error().unwrap_or(""),
            "Wallet responded"
        );

        Ok(outcome)
    }
}

impl std::fmt::Debug for KeychainBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainBridge").finish_non_exhaustive()
    }
}

//! Bounded fixed-delay polling of the ledger.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::Instrument;

use crate::config::ConfirmationConfig;
use crate::confirmation::types::ValidationResult;
use crate::events::{Event, EventBus};
use crate::ledger::{Ledger, LedgerTransaction};
use crate::observability::metrics;

/// Delay before each ledger query.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Queries made before giving up (50 seconds of waiting at the default interval).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Poller state.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// `attempt` queries made so far, none found the transaction.
    Polling { attempt: u32 },
    /// The ledger returned the transaction.
    Found(LedgerTransaction),
    /// The attempt budget ran out.
    Exhausted,
}

impl PollState {
    /// Apply the outcome of one query. Terminal states are absorbing.
    pub fn advance(self, record: Option<LedgerTransaction>, max_attempts: u32) -> Self {
        match self {
            PollState::Polling { attempt } => match record {
                Some(trx) => PollState::Found(trx),
                None if attempt + 1 >= max_attempts => PollState::Exhausted,
                None => PollState::Polling { attempt: attempt + 1 },
            },
            terminal => terminal,
        }
    }
}

/// Confirms a submitted transaction against the ledger.
#[derive(Clone)]
pub struct ConfirmationPoller {
    ledger: Arc<dyn Ledger>,
    bus: EventBus,
    interval: Duration,
    max_attempts: u32,
}

impl ConfirmationPoller {
    pub fn new(ledger: Arc<dyn Ledger>, bus: EventBus) -> Self {
        Self {
            ledger,
            bus,
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn from_config(ledger: Arc<dyn Ledger>, bus: EventBus, config: &ConfirmationConfig) -> Self {
        Self::new(ledger, bus)
            .with_interval(Duration::from_secs(config.poll_interval_secs))
            .with_max_attempts(config.max_attempts)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Poll with the configured attempt budget.
    pub async fn validate_transaction(&self, trx_id: &str) -> ValidationResult {
        self.validate_transaction_with(trx_id, self.max_attempts).await
    }

    /// Poll until the ledger returns the transaction or `max_attempts` queries
    /// come back empty, then publish `transaction-validated`.
    ///
    /// At least one query is always made.
    pub async fn validate_transaction_with(&self, trx_id: &str, max_attempts: u32) -> ValidationResult {
        let span = tracing::info_span!("validate_transaction", trx_id = %trx_id, max_attempts);

        async move {
            let mut state = PollState::Polling { attempt: 0 };

            while let PollState::Polling { attempt } = state {
                sleep(self.interval).await;
                let record = self.query(trx_id, attempt + 1).await;
                state = state.advance(record, max_attempts);
            }

            let result = match state {
                PollState::Found(trx) => ValidationResult::from_transaction(trx_id, &trx),
                _ => ValidationResult::not_found(trx_id),
            };

            metrics::record_validation(result.status());
            tracing::info!(status = result.status(), "Transaction validated");

            self.bus.publish(Event::TransactionValidated(result.clone()));
            result
        }
        .instrument(span)
        .await
    }

    async fn query(&self, trx_id: &str, attempt: u32) -> Option<LedgerTransaction> {
        match self.ledger.get_transaction(trx_id).await {
            Ok(Some(trx)) => {
                metrics::record_ledger_query("found");
                Some(trx)
            }
            Ok(None) => {
                metrics::record_ledger_query("missing");
                tracing::debug!(attempt, "Transaction not processed yet");
                None
            }
            Err(e) => {
                metrics::record_ledger_query("error");
                tracing::warn!(attempt, error = %e, "Ledger query failed, will retry");
                None
            }
        }
    }
}

impl std::fmt::Debug for ConfirmationPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationPoller")
            .field("interval", &self.interval)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LedgerError, LedgerResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    /// Returns the record on call `found_on` (1-based), errors on the calls in `fail_on`.
    struct ScriptedLedger {
        calls: AtomicU32,
        found_on: Option<u32>,
        fail_on: Vec<u32>,
        logs: &'static str,
    }

    impl ScriptedLedger {
        fn new(found_on: Option<u32>, fail_on: Vec<u32>, logs: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                found_on,
                fail_on,
                logs,
            })
        }
    }

    #[async_trait]
    impl Ledger for ScriptedLedger {
        async fn get_transaction(&self, _trx_id: &str) -> LedgerResult<Option<LedgerTransaction>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.contains(&call) {
                return Err(LedgerError::Rpc("connection reset".into()));
            }
            if Some(call) == self.found_on {
                return Ok(Some(LedgerTransaction {
                    contract: Some("tokens".into()),
                    action: Some("transfer".into()),
                    payload: Some(r#"{"to":"bob"}"#.into()),
                    logs: Some(self.logs.into()),
                    ..Default::default()
                }));
            }
            Ok(None)
        }
    }

    #[test]
    fn test_state_transitions() {
        let trx = LedgerTransaction::default();
        let start = PollState::Polling { attempt: 0 };

        assert_eq!(start.clone().advance(None, 5), PollState::Polling { attempt: 1 });
        assert_eq!(start.clone().advance(Some(trx.clone()), 5), PollState::Found(trx.clone()));
        assert_eq!(PollState::Polling { attempt: 4 }.advance(None, 5), PollState::Exhausted);
        assert_eq!(start.advance(None, 0), PollState::Exhausted);

        assert_eq!(PollState::Exhausted.advance(Some(trx), 5), PollState::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_found_on_third_query() {
        let ledger = ScriptedLedger::new(Some(3), vec![], r#"{"errors":["x"]}"#);
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let poller = ConfirmationPoller::new(ledger.clone(), bus);

        let started = Instant::now();
        let result = poller.validate_transaction("t1").await;

        assert!(result.error);
        assert_eq!(result.contract.as_deref(), Some("tokens"));
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(30));
        assert_eq!(rx.recv().await.unwrap(), Event::TransactionValidated(result));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_despite_transient_errors() {
        let ledger = ScriptedLedger::new(None, vec![1, 4], "{}");
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let poller = ConfirmationPoller::new(ledger.clone(), bus);

        let started = Instant::now();
        let result = poller.validate_transaction("t2").await;

        assert_eq!(result, ValidationResult::not_found("t2"));
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 5);
        assert_eq!(started.elapsed(), Duration::from_secs(50));
        assert_eq!(rx.recv().await.unwrap(), Event::TransactionValidated(result));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_then_found() {
        let ledger = ScriptedLedger::new(Some(2), vec![1], r#"{"events":[]}"#);
        let poller = ConfirmationPoller::new(ledger.clone(), EventBus::default())
            .with_interval(Duration::from_secs(1));

        let result = poller.validate_transaction_with("t3", 2).await;

        assert!(!result.error);
        assert_eq!(result.payload, Some(serde_json::json!({"to": "bob"})));
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_found_after_budget_is_not_seen() {
        let ledger = ScriptedLedger::new(Some(4), vec![], "{}");
        let config = ConfirmationConfig {
            poll_interval_secs: 1,
            max_attempts: 3,
        };
        let poller = ConfirmationPoller::from_config(ledger.clone(), EventBus::default(), &config);

        let result = poller.validate_transaction("t4").await;

        assert_eq!(result.status(), "not_found");
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 3);
    }
}

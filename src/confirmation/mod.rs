//! Transaction confirmation.
//!
//! # Data Flow
//! ```text
//! trx_id
//!     → poller.rs: Polling { attempt } ──sleep, Ledger::get_transaction──┐
//!                      ▲                                               │
//!                      └────── not found / transient error ◀───────────┤
//!                                                                      ▼
//!                                 Found(trx) | Exhausted (attempt budget spent)
//!     → types.rs: ValidationResult (logs.errors drives `error`)
//!     → publish transaction-validated
//! ```
//!
//! # Design Decisions
//! - Fixed delay, bounded attempts; the ledger offers no push channel
//! - Transient query errors are logged and count as "not found yet"
//! - No cancellation: a poll ends only by finding the record or spending its budget

pub mod poller;
pub mod types;

pub use poller::{ConfirmationPoller, PollState, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use types::ValidationResult;

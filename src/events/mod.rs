//! Lifecycle events published to UI listeners.
//!
//! # Data Flow
//! ```text
//! broadcast::Broadcaster ──┐
//!                          ├─▶ EventBus::publish ─▶ broadcast channel ─▶ subscribers
//! confirmation::Poller ────┘
//! ```
//!
//! Event names and payload shapes are the contract with listeners:
//! `broadcast-awaiting`, `broadcast-success` (or a caller-named alternative),
//! `broadcast-done`, `transaction-validated`.

pub mod bus;
pub mod types;

pub use bus::EventBus;
pub use types::{Event, BROADCAST_AWAITING, BROADCAST_DONE, BROADCAST_SUCCESS, TRANSACTION_VALIDATED};

//! Wallet broadcast bridge and sidechain transaction confirmation.
//!
//! # Architecture Overview
//!
//! ```text
//!   TransferRequest / CustomJsonRequest
//!        │
//!        ▼
//!   ┌─────────────┐   call + callback   ┌──────────────────┐
//!   │ broadcast   │────────────────────▶│ keychain (wallet)│
//!   │ Broadcaster │◀────────────────────│ KeychainBridge   │
//!   └──────┬──────┘   KeychainOutcome   └──────────────────┘
//!          │ broadcast-awaiting / -success / -done
//!          ▼
//!   ┌─────────────┐                     ┌──────────────────┐
//!   │  events     │◀────────────────────│ confirmation     │── Ledger::get_transaction ──▶ sidechain
//!   │  EventBus   │ transaction-validated│ ConfirmationPoller│
//!   └─────────────┘                     └──────────────────┘
//!
//!   market (settings, price, username) ── read by Broadcaster
//!   config / observability ── cross-cutting
//! ```

pub mod broadcast;
pub mod config;
pub mod confirmation;
pub mod events;
pub mod json;
pub mod keychain;
pub mod ledger;
pub mod market;
pub mod observability;

pub use broadcast::{Broadcaster, CustomJsonRequest, TransferRequest};
pub use config::AppConfig;
pub use confirmation::{ConfirmationPoller, ValidationResult};
pub use events::{Event, EventBus};
pub use keychain::{Keychain, KeychainBridge, KeychainOutcome};

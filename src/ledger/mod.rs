//! Sidechain ledger access.
//!
//! # Data Flow
//! ```text
//! ConfirmationPoller
//!     → Ledger::get_transaction (trait, swappable in tests)
//!     → client.rs: JSON-RPC getTransactionInfo with timeout, failover endpoints
//!     → types.rs: LedgerTransaction or None
//! ```
//!
//! # Design Decisions
//! - Every RPC call has a timeout
//! - Lookups are idempotent and safe to repeat

pub mod client;
pub mod types;

pub use client::SidechainClient;
pub use types::{Ledger, LedgerError, LedgerResult, LedgerTransaction};

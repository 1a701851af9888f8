//! Broadcast orchestration.
//!
//! # Data Flow
//! ```text
//! TransferRequest / CustomJsonRequest
//!     → orchestrator.rs: publish broadcast-awaiting
//!     → KeychainBridge::request (user confirms in wallet)
//!     → on success: BroadcastResult (id normalised, ntrx for custom JSON)
//!                   publish broadcast-success or the caller's event name
//!     → publish broadcast-done (always)
//! ```
//!
//! Failure and cancel publish nothing of their own: a `broadcast-done` with no
//! success event since the matching `broadcast-awaiting` means "not accepted".

pub mod orchestrator;
pub mod types;

pub use orchestrator::{BroadcastError, Broadcaster};
pub use types::{BroadcastResult, CustomJsonRequest, KeyType, TransferRequest};

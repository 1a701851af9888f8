//! Market data shared with the broadcast flows.
//!
//! # Data Flow
//! ```text
//! exchange API /settings ─┐
//!                         ├─▶ client.rs ─▶ state.rs (atomic swap) ─▶ Broadcaster (sidechain_id, username)
//! price feed ─────────────┘
//! ```
//!
//! # Design Decisions
//! - Fetch failures are swallowed: previous values stay in place
//! - State is read-mostly, so readers never block on a fetch

pub mod client;
pub mod state;

pub use client::{MarketClient, MarketError};
pub use state::{MarketState, Settings};

//! Wallet extension integration.
//!
//! # Data Flow
//! ```text
//! Broadcaster
//!     → bridge.rs (install one-shot callback, suspend)
//!     → Keychain::call (external wallet, user confirms or cancels)
//!     → callback fires once with the raw response
//!     → types.rs (classify: Success | Cancelled | Failed)
//! ```
//!
//! # Design Decisions
//! - The wallet is callback-based; the bridge turns each call into a single
//!   awaitable with no timeout
//! - Cancel and failure are outcomes, not errors; only programming errors
//!   (unsupported capability, callback dropped unanswered) are `Err`

pub mod bridge;
pub mod types;

pub use bridge::{Keychain, KeychainBridge, KeychainCallback};
pub use types::{KeychainError, KeychainMethod, KeychainOutcome, KeychainResponse, USER_CANCEL};

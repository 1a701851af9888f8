//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to ledger / market / confirmation at startup
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal (even empty) configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AppConfig, BroadcastConfig, ConfirmationConfig, EventsConfig, LedgerConfig, MarketConfig,
    ObservabilityConfig,
};

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! keychain / broadcast / confirmation / market
//!     → logging.rs (structured log events, stderr)
//!     → metrics.rs (counters, optional Prometheus endpoint)
//! ```

pub mod logging;
pub mod metrics;

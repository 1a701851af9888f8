//! Metrics collection and exposition.
//!
//! # Metrics
//! - `keychain_requests_total` (counter): wallet requests by method and outcome
//! - `ledger_queries_total` (counter): ledger lookups by result (found, missing, error)
//! - `transactions_validated_total` (counter): terminal poller results by status
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so library users
//!   that never call `init_metrics` pay nothing
//! - Prometheus exporter runs on its own listener

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and start its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed wallet request.
pub fn record_keychain_request(method: &'static str, outcome: &'static str) {
    metrics::counter!("keychain_requests_total", "method" => method, "outcome" => outcome)
        .increment(1);
}

/// Record one ledger lookup made by the confirmation poller.
pub fn record_ledger_query(result: &'static str) {
    metrics::counter!("ledger_queries_total", "result" => result).increment(1);
}

/// Record a terminal validation result.
pub fn record_validation(status: &'static str) {
    metrics::counter!("transactions_validated_total", "status" => status).increment(1);
}

//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("observability.metrics_address: invalid socket address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Check semantic constraints serde cannot express.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "ledger.rpc_url", &config.ledger.rpc_url);
    for url in &config.ledger.failover_urls {
        check_url(&mut errors, "ledger.failover_urls", url);
    }
    check_url(&mut errors, "market.api_url", &config.market.api_url);
    check_url(&mut errors, "market.price_url", &config.market.price_url);

    if config.ledger.timeout_secs == 0 {
        errors.push(ValidationError::Zero("ledger.timeout_secs"));
    }
    if config.market.timeout_secs == 0 {
        errors.push(ValidationError::Zero("market.timeout_secs"));
    }
    if config.confirmation.poll_interval_secs == 0 {
        errors.push(ValidationError::Zero("confirmation.poll_interval_secs"));
    }
    if config.confirmation.max_attempts == 0 {
        errors.push(ValidationError::Zero("confirmation.max_attempts"));
    }
    if config.events.capacity == 0 {
        errors.push(ValidationError::Zero("events.capacity"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if url::Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval, timeout, concurrency, threshold > 0)
//! - Reject empty service lists and duplicate service keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BoardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::BoardConfig;
use crate::health::ServiceKey;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("interval_seconds must be greater than 0")]
    ZeroInterval,

    #[error("timeout_ms must be greater than 0")]
    ZeroTimeout,

    #[error("concurrency must be greater than 0")]
    ZeroConcurrency,

    #[error("failure_threshold must be greater than 0")]
    ZeroThreshold,

    #[error("no services defined")]
    NoServices,

    #[error("service #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("service #{index} has an empty url")]
    EmptyUrl { index: usize },

    #[error("duplicate service '{key}'")]
    DuplicateService { key: String },
}

/// Check a parsed configuration, collecting every violation.
pub fn validate_config(config: &BoardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.interval_seconds == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.concurrency == 0 {
        errors.push(ValidationError::ZeroConcurrency);
    }
    if config.failure_threshold == 0 {
        errors.push(ValidationError::ZeroThreshold);
    }
    if config.services.is_empty() {
        errors.push(ValidationError::NoServices);
    }

    let mut seen: HashSet<ServiceKey> = HashSet::new();
    for (index, service) in config.services.iter().enumerate() {
        if service.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        }
        if service.url.trim().is_empty() {
            errors.push(ValidationError::EmptyUrl { index });
        }
        let key = service.key();
        if !seen.insert(key.clone()) {
            errors.push(ValidationError::DuplicateService { key: key.to_string() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

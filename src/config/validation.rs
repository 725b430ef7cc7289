//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, step units > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("client.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("steps.unit_ms must be greater than zero")]
    ZeroStepUnit,

    #[error("steps.delays_ms must not be empty when set")]
    EmptyDelays,

    #[error("demo.{field} must be greater than zero")]
    ZeroDemoDelay { field: &'static str },
}

/// Check a configuration, collecting every error.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.client.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    match &config.steps.delays_ms {
        Some(delays) if delays.is_empty() => errors.push(ValidationError::EmptyDelays),
        Some(_) => {}
        None if config.steps.unit_ms == 0 => errors.push(ValidationError::ZeroStepUnit),
        None => {}
    }

    if config.demo.cancel_after_ms == Some(0) {
        errors.push(ValidationError::ZeroDemoDelay { field: "cancel_after_ms" });
    }
    if config.demo.dispose_after_ms == Some(0) {
        errors.push(ValidationError::ZeroDemoDelay { field: "dispose_after_ms" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

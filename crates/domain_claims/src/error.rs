//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not permitted: {0}")]
    NotPermitted(String),
}

impl ClaimError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ClaimError::NotFound(id.to_string())
    }

    pub fn validation_failed(errors: Vec<String>) -> Self {
        ClaimError::Validation(errors.join("; "))
    }

    pub fn not_permitted(message: impl Into<String>) -> Self {
        ClaimError::NotPermitted(message.into())
    }
}

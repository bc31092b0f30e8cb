//! Directory domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the user directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// An account with the same email (ignoring case) already exists
    #[error("User with email {0} already exists")]
    DuplicateUser(String),

    /// No account matches the email
    #[error("User not found: {0}")]
    NotFound(String),

    /// Registration data failed the field rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown email, wrong password, or a deactivated account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The backing store rejected a write
    #[error("User store error: {0}")]
    Storage(#[from] PortError),
}

impl DirectoryError {
    /// Creates a NotFound error for an email
    pub fn not_found(email: impl Into<String>) -> Self {
        DirectoryError::NotFound(email.into())
    }

    /// Creates a Validation error from a list of messages
    pub fn validation_failed(errors: Vec<String>) -> Self {
        DirectoryError::Validation(errors.join("; "))
    }
}

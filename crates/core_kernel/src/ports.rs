//! Ports and Adapters Infrastructure
//!
//! Domain crates define port traits for what they need from the outside
//! world (for example the user directory's backing store). Adapters in the
//! infrastructure crates implement them.
//!
//! ```text
//!   domain_directory::UserStorePort
//!            ▲                 ▲
//!            │                 │
//!   JsonFileUserStore   InMemoryUserStore
//!     (infra_store)      (tests / demos)
//! ```
//!
//! Every port method reports failures as a [`PortError`] so the domain can
//! handle internal and external adapters the same way.

use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// Reading from or writing to the backing medium failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stored data could not be converted to or from domain types
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PortError {
    /// Creates an Io error wrapping the underlying cause
    pub fn io(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the stored data exists but cannot be read as domain data
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, PortError::Transformation { .. })
    }
}

/// Marker trait for all domain ports
///
/// Port implementations are shared across request handlers, so they must be
/// thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

impl<T: DomainPort> DomainPort for std::sync::Arc<T> {}

//! Storage error types

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur while reading or writing a store file
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not hold the expected JSON
    #[error("Malformed store file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Malformed {
            path: path.into(),
            source,
        }
    }
}

/// Malformed content is a transformation failure; the directory treats it
/// as an empty store and re-seeds.
impl From<StoreError> for PortError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Io { path, source } => {
                PortError::io(format!("store file {}", path.display()), source)
            }
            StoreError::Malformed { .. } | StoreError::Serialization(_) => {
                PortError::transformation(error.to_string())
            }
        }
    }
}

//! Reporting errors

use thiserror::Error;

use core_kernel::TemporalError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Temporal(#[from] TemporalError),
}

impl From<csv::Error> for ReportError {
    fn from(e: csv::Error) -> Self {
        ReportError::Export(e.to_string())
    }
}

//! Claim Reporting
//!
//! Read-only views over claims returned by the repository:
//!
//! - [`summary`]: totals, per-status counts, date-range selection
//! - [`payments`]: approved claims grouped per lecturer for a payment run
//! - [`export`]: delimited-text rendering of claims and payment runs

pub mod summary;
pub mod payments;
pub mod export;
pub mod error;

pub use summary::{filter_by_date_range, summarize, ClaimSummary};
pub use payments::{payment_summary, LecturerPayment, PaymentSummary};
pub use export::{payments_to_delimited_text, to_delimited_text, CLAIM_HEADER, PAYMENT_HEADER};
pub use error::ReportError;

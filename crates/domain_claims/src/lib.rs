//! Claims Domain
//!
//! This crate implements hourly-work reimbursement claims from draft through
//! review, approval and payment.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Draft -> Submitted -> UnderReview -> Approved -> Paid
//!              \             /
//!               +-> Rejected
//! ```
//!
//! - [`claim`]: the claim aggregate and its computed amount
//! - [`lifecycle`]: the transition table and who may fire each transition
//! - [`repository`]: in-memory claim store, queries and statistics
//! - [`service`]: caller-facing operations combining the three

pub mod claim;
pub mod lifecycle;
pub mod repository;
pub mod service;
pub mod samples;
pub mod error;

pub use claim::{Claim, ClaimDetails, ClaimStatus};
pub use lifecycle::{ClaimLifecycle, Capability};
pub use repository::{ClaimRepository, ClaimStatistics};
pub use service::{ClaimService, PaymentBatch};
pub use error::ClaimError;

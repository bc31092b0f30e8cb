//! Core Kernel - Foundational types for the lecturer claims system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers
//! - Inclusive calendar periods for reporting
//! - Port errors shared by every persistence adapter

pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use temporal::{DatePeriod, TemporalError};
pub use identifiers::{ClaimId, PaymentBatchId};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;

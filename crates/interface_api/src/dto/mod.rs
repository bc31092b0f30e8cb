//! Request and response bodies

pub mod accounts;
pub mod claims;
pub mod reports;

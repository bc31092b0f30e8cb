//! Tests for core_kernel error types

use chrono::NaiveDate;
use core_kernel::error::CoreError;
use core_kernel::{DatePeriod, TemporalError};

#[test]
fn test_inverted_period_converts_to_core_error() {
    let from = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let core_error: CoreError = DatePeriod::new(from, to).unwrap_err().into();

    assert!(matches!(core_error, CoreError::Temporal(TemporalError::InvalidPeriod { .. })));
    assert!(core_error.to_string().starts_with("Temporal error"));
}

#[test]
fn test_configuration_message_is_kept() {
    let error = CoreError::configuration("invalid type for port");

    assert_eq!(error.to_string(), "Configuration error: invalid type for port");
}

#[test]
fn test_validation_helper() {
    match CoreError::validation("jwt_secret must not be empty") {
        CoreError::Validation(msg) => assert!(msg.contains("jwt_secret")),
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use domain_claims::{Claim, ClaimError, ClaimStatus};

/// Asserts that a claim's amount equals hours times rate
pub fn assert_amount_consistent(claim: &Claim) {
    let expected = claim.hours() * claim.hourly_rate();
    assert_eq!(
        claim.amount(),
        expected,
        "Claim {} amount {} does not match {} hours at {}",
        claim.id(),
        claim.amount(),
        claim.hours(),
        claim.hourly_rate()
    );
}

/// Asserts that the timestamps a claim carries match its status
///
/// Rejected claims keep the review fields of whoever rejected them.
pub fn assert_timestamps_match_status(claim: &Claim) {
    use ClaimStatus::*;
    let status = claim.status();

    let submitted = !matches!(status, Draft);
    let reviewed = matches!(status, UnderReview | Approved | Paid | Rejected);
    let approved = matches!(status, Approved | Paid);
    let paid = matches!(status, Paid);

    assert_eq!(claim.submitted_date().is_some(), submitted, "submitted_date on {} claim", status);
    if status != Rejected {
        assert_eq!(claim.reviewed_date().is_some(), reviewed, "reviewed_date on {} claim", status);
        assert_eq!(claim.reviewed_by().is_some(), reviewed, "reviewed_by on {} claim", status);
    }
    assert_eq!(claim.approved_date().is_some(), approved, "approved_date on {} claim", status);
    assert_eq!(claim.approved_by().is_some(), approved, "approved_by on {} claim", status);
    assert_eq!(claim.paid_date().is_some(), paid, "paid_date on {} claim", status);
}

/// Asserts that the error is a refused transition between the given statuses
pub fn assert_invalid_transition(error: &ClaimError, expected_from: ClaimStatus, expected_to: ClaimStatus) {
    match error {
        ClaimError::InvalidTransition { from, to, .. } => {
            assert_eq!(from, &expected_from.to_string(), "transition source");
            assert_eq!(to, &expected_to.to_string(), "transition target");
        }
        other => panic!("Expected InvalidTransition, got {:?}", other),
    }
}

/// Asserts that a list of claims sums to the expected amount
pub fn assert_total_amount(claims: &[&Claim], expected: Decimal) {
    let total: Decimal = claims.iter().map(|c| c.amount()).sum();
    assert_eq!(total, expected, "Sum of {} claim amounts", claims.len());
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}

//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{ClaimDetails, ClaimStatus};
use domain_directory::UserRole;

/// Whole hours within the monthly limits (1 to 744)
pub fn valid_hours_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=744i64).prop_map(Decimal::from)
}

/// Hours with up to two decimal places within the monthly limits
pub fn fractional_hours_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..=74_400i64).prop_map(|n| Decimal::new(n, 2))
}

/// Rates from 0.01 to 1000.00
pub fn valid_rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Hours outside the accepted range
pub fn invalid_hours_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (-1_000i64..1i64).prop_map(Decimal::from),
        (745i64..10_000i64).prop_map(Decimal::from),
    ]
}

/// Non-blank titles up to the maximum length
pub fn title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,99}"
}

/// Month labels such as "March 2024"
pub fn month_year_strategy() -> impl Strategy<Value = String> {
    let months = prop::sample::select(vec![
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ]);
    (months, 2020u32..2030u32).prop_map(|(month, year)| format!("{} {}", month, year))
}

/// Claim details that pass validation
pub fn valid_details_strategy() -> impl Strategy<Value = ClaimDetails> {
    (
        title_strategy(),
        month_year_strategy(),
        fractional_hours_strategy(),
        valid_rate_strategy(),
    )
        .prop_map(|(title, month_year, hours, rate)| ClaimDetails::new(title, month_year, hours, rate))
}

pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop::sample::select(ClaimStatus::ALL.to_vec())
}

pub fn role_strategy() -> impl Strategy<Value = UserRole> {
    prop::sample::select(UserRole::ALL.to_vec())
}

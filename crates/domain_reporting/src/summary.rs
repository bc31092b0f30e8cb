//! Claim summaries and date-range selection

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::DatePeriod;
use domain_claims::{Claim, ClaimStatus};

/// Aggregate figures over a set of claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimSummary {
    pub count: usize,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
    /// Every status is present, zero when no claim has it
    pub count_by_status: BTreeMap<ClaimStatus, usize>,
    pub approved_or_paid_amount: Decimal,
}

impl ClaimSummary {
    pub fn count_of(&self, status: ClaimStatus) -> usize {
        self.count_by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Summarizes a set of claims
pub fn summarize<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> ClaimSummary {
    let mut summary = ClaimSummary {
        count: 0,
        total_hours: Decimal::ZERO,
        total_amount: Decimal::ZERO,
        count_by_status: ClaimStatus::ALL.into_iter().map(|s| (s, 0)).collect(),
        approved_or_paid_amount: Decimal::ZERO,
    };

    for claim in claims {
        summary.count += 1;
        summary.total_hours += claim.hours();
        summary.total_amount += claim.amount();
        *summary.count_by_status.entry(claim.status()).or_insert(0) += 1;
        if matches!(claim.status(), ClaimStatus::Approved | ClaimStatus::Paid) {
            summary.approved_or_paid_amount += claim.amount();
        }
    }

    summary
}

/// Claims submitted within the period, by calendar date
///
/// Claims that were never submitted have no date and are left out.
pub fn filter_by_date_range<'a>(
    claims: impl IntoIterator<Item = &'a Claim>,
    period: &DatePeriod,
) -> Vec<&'a Claim> {
    claims
        .into_iter()
        .filter(|c| c.submitted_date().map_or(false, |at| period.contains(at)))
        .collect()
}

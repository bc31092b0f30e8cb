//! Payment run preparation for HR

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus};

/// Approved claims owed to one lecturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LecturerPayment {
    pub user_email: String,
    pub claim_ids: Vec<ClaimId>,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
}

/// Everything currently owed, per lecturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    /// Ordered by lecturer email
    pub lecturers: Vec<LecturerPayment>,
    pub claim_count: usize,
    pub total_amount: Decimal,
}

/// Groups the approved claims in `claims` by owner
///
/// Claims in any other status are ignored.
pub fn payment_summary<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> PaymentSummary {
    let mut grouped: BTreeMap<&str, LecturerPayment> = BTreeMap::new();

    for claim in claims {
        if claim.status() != ClaimStatus::Approved {
            continue;
        }
        let entry = grouped
            .entry(claim.user_email())
            .or_insert_with(|| LecturerPayment {
                user_email: claim.user_email().to_string(),
                claim_ids: Vec::new(),
                total_hours: Decimal::ZERO,
                total_amount: Decimal::ZERO,
            });
        entry.claim_ids.push(claim.id());
        entry.total_hours += claim.hours();
        entry.total_amount += claim.amount();
    }

    let lecturers: Vec<LecturerPayment> = grouped.into_values().collect();
    PaymentSummary {
        claim_count: lecturers.iter().map(|l| l.claim_ids.len()).sum(),
        total_amount: lecturers.iter().map(|l| l.total_amount).sum(),
        lecturers,
    }
}

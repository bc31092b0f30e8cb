//! Claim repository
//!
//! Claims live in memory for the life of the process. The repository keeps
//! insertion order and applies each query's ordering on read.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use core_kernel::ClaimId;
use domain_directory::UserDirectory;

use crate::claim::{Claim, ClaimStatus};

/// Dashboard figures computed on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimStatistics {
    pub active_user_count: usize,
    pub total_claim_count: usize,
    /// Claims approved but not yet paid
    pub pending_payment_count: usize,
    /// Sum of amounts over Approved and Paid claims
    pub total_approved_or_paid_amount: Decimal,
}

/// In-memory claim collection
#[derive(Debug, Default)]
pub struct ClaimRepository {
    claims: Vec<Claim>,
}

impl ClaimRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a claim
    pub fn add(&mut self, claim: Claim) {
        debug!(claim_id = %claim.id(), owner = %claim.user_email(), "Adding claim");
        self.claims.push(claim);
    }

    /// Replaces the stored claim with the same id, in place
    ///
    /// Returns false, changing nothing, when the id is unknown.
    pub fn update(&mut self, claim: Claim) -> bool {
        match self.claims.iter_mut().find(|c| c.id() == claim.id()) {
            Some(slot) => {
                *slot = claim;
                true
            }
            None => {
                debug!(claim_id = %claim.id(), "Ignoring update for unknown claim");
                false
            }
        }
    }

    pub fn find_by_id(&self, id: ClaimId) -> Option<&Claim> {
        self.claims.iter().find(|c| c.id() == id)
    }

    /// Claims whose owner email matches exactly, newest submission first
    ///
    /// Claims never submitted come last. Ties keep insertion order.
    pub fn list_by_user(&self, email: &str) -> Vec<&Claim> {
        let mut claims: Vec<&Claim> = self
            .claims
            .iter()
            .filter(|c| c.user_email() == email)
            .collect();
        claims.sort_by(|a, b| newest_first(a.submitted_date(), b.submitted_date()));
        claims
    }

    /// Every claim, newest submission first
    pub fn list_all(&self) -> Vec<&Claim> {
        let mut claims: Vec<&Claim> = self.claims.iter().collect();
        claims.sort_by(|a, b| newest_first(a.submitted_date(), b.submitted_date()));
        claims
    }

    /// Claims waiting on a reviewer, oldest submission first
    pub fn list_pending(&self) -> Vec<&Claim> {
        let mut claims: Vec<&Claim> = self
            .claims
            .iter()
            .filter(|c| c.status().is_pending_review())
            .collect();
        claims.sort_by(|a, b| oldest_first(a.submitted_date(), b.submitted_date()));
        claims
    }

    /// Approved claims waiting on payment, oldest approval first
    pub fn list_approved_for_payment(&self) -> Vec<&Claim> {
        let mut claims: Vec<&Claim> = self
            .claims
            .iter()
            .filter(|c| c.status() == ClaimStatus::Approved)
            .collect();
        claims.sort_by(|a, b| oldest_first(a.approved_date(), b.approved_date()));
        claims
    }

    /// Dashboard statistics
    pub fn statistics(&self, directory: &UserDirectory) -> ClaimStatistics {
        ClaimStatistics {
            active_user_count: directory.active_user_count(),
            total_claim_count: self.claims.len(),
            pending_payment_count: self
                .claims
                .iter()
                .filter(|c| c.status() == ClaimStatus::Approved)
                .count(),
            total_approved_or_paid_amount: self
                .claims
                .iter()
                .filter(|c| matches!(c.status(), ClaimStatus::Approved | ClaimStatus::Paid))
                .map(Claim::amount)
                .sum(),
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn oldest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimDetails;
    use crate::lifecycle::ClaimLifecycle;
    use chrono::Duration;
    use domain_directory::{Actor, InMemoryUserStore, UserRole};
    use rust_decimal_macros::dec;

    fn draft(owner: &str, hours: Decimal) -> Claim {
        Claim::draft(owner, ClaimDetails::new("Lectures", "May 2024", hours, dec!(100))).unwrap()
    }

    fn submitted_at(owner: &str, at: DateTime<Utc>) -> Claim {
        let mut claim = draft(owner, dec!(10));
        let actor = Actor::new(owner, UserRole::Lecturer);
        ClaimLifecycle::transition_at(&mut claim, ClaimStatus::Submitted, &actor, at).unwrap();
        claim
    }

    #[test]
    fn test_update_unknown_id_is_ignored() {
        let mut repository = ClaimRepository::new();
        repository.add(draft("a@university.com", dec!(1)));

        assert!(!repository.update(draft("a@university.com", dec!(2))));
        assert_eq!(repository.len(), 1);
        assert_eq!(repository.list_all()[0].hours(), dec!(1));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut repository = ClaimRepository::new();
        let mut claim = draft("a@university.com", dec!(1));
        repository.add(claim.clone());
        repository.add(draft("b@university.com", dec!(3)));

        claim.revise(ClaimDetails::new("Lectures", "May 2024", dec!(5), dec!(100))).unwrap();
        assert!(repository.update(claim.clone()));

        assert_eq!(repository.find_by_id(claim.id()).unwrap().amount(), dec!(500));
        assert_eq!(repository.len(), 2);
    }

    #[test]
    fn test_list_pending_oldest_first() {
        let now = Utc::now();
        let mut repository = ClaimRepository::new();
        repository.add(submitted_at("a@university.com", now));
        repository.add(submitted_at("b@university.com", now - Duration::days(3)));
        repository.add(draft("c@university.com", dec!(1)));

        let pending = repository.list_pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].user_email(), "b@university.com");
    }

    #[test]
    fn test_statistics_sum_approved_and_paid() {
        let directory = domain_directory::UserDirectory::open(InMemoryUserStore::new());
        let reviewer = Actor::new("coordinator@university.com", UserRole::ProgramCoordinator);
        let hr = Actor::new("hr@university.com", UserRole::HrManager);

        let mut repository = ClaimRepository::new();
        for hours in [dec!(10), dec!(20), dec!(30)] {
            let mut claim = draft("lecturer@university.com", hours);
            let owner = Actor::new("lecturer@university.com", UserRole::Lecturer);
            ClaimLifecycle::transition(&mut claim, ClaimStatus::Submitted, &owner).unwrap();
            ClaimLifecycle::transition(&mut claim, ClaimStatus::UnderReview, &reviewer).unwrap();
            if hours > dec!(10) {
                ClaimLifecycle::transition(&mut claim, ClaimStatus::Approved, &reviewer).unwrap();
            }
            if hours > dec!(20) {
                ClaimLifecycle::transition(&mut claim, ClaimStatus::Paid, &hr).unwrap();
            }
            repository.add(claim);
        }

        let stats = repository.statistics(&directory);
        assert_eq!(stats.active_user_count, 4);
        assert_eq!(stats.total_claim_count, 3);
        assert_eq!(stats.pending_payment_count, 1);
        assert_eq!(stats.total_approved_or_paid_amount, dec!(5000));
    }
}

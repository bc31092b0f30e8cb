//! Test Data Builders
//!
//! Claims can only reach a status through the lifecycle, so the claim
//! builder creates a draft and then fires each transition on the way to the
//! requested status. Every step is one day after the previous one.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use domain_claims::{Claim, ClaimDetails, ClaimLifecycle, ClaimRepository, ClaimStatus};
use domain_directory::Actor;

use crate::fixtures::{DetailsFixtures, TemporalFixtures, UserFixtures};

/// The transitions leading from Draft to `status`, with who fires them
pub fn path_to(status: ClaimStatus, owner: &Actor) -> Vec<(ClaimStatus, Actor)> {
    use ClaimStatus::*;

    let submit = (Submitted, owner.clone());
    let review = (UnderReview, UserFixtures::coordinator());
    let approve = (Approved, UserFixtures::manager());
    let pay = (Paid, UserFixtures::hr());

    match status {
        Draft => vec![],
        Submitted => vec![submit],
        UnderReview => vec![submit, review],
        Approved => vec![submit, review, approve],
        Paid => vec![submit, review, approve, pay],
        Rejected => vec![submit, review, (Rejected, UserFixtures::coordinator())],
    }
}

/// Builder for claims in any status
pub struct TestClaimBuilder {
    owner: Actor,
    details: ClaimDetails,
    status: ClaimStatus,
    created_at: DateTime<Utc>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// A September teaching claim owned by the default lecturer, still a draft
    pub fn new() -> Self {
        Self {
            owner: UserFixtures::lecturer(),
            details: DetailsFixtures::september_teaching(),
            status: ClaimStatus::Draft,
            created_at: TemporalFixtures::start_of_year(),
        }
    }

    pub fn with_owner(mut self, owner: Actor) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_details(mut self, details: ClaimDetails) -> Self {
        self.details = details;
        self
    }

    pub fn with_hours(mut self, hours: Decimal) -> Self {
        self.details.hours = hours;
        self
    }

    pub fn with_hourly_rate(mut self, hourly_rate: Decimal) -> Self {
        self.details.hourly_rate = hourly_rate;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.details.title = title.into();
        self
    }

    /// Status the built claim ends in
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    /// Creation time; transitions follow at daily steps
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds the claim
    ///
    /// # Panics
    ///
    /// Panics if the details are invalid.
    pub fn build(self) -> Claim {
        let mut claim = Claim::draft_at(self.owner.email.clone(), self.details, self.created_at)
            .expect("builder details must be valid");

        let mut at = self.created_at;
        for (target, actor) in path_to(self.status, &self.owner) {
            at += Duration::days(1);
            ClaimLifecycle::transition_at(&mut claim, target, &actor, at)
                .expect("builder path must follow the lifecycle");
        }
        claim
    }
}

/// Builder for repositories holding several claims
#[derive(Default)]
pub struct TestRepositoryBuilder {
    claims: Vec<Claim>,
}

impl TestRepositoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    /// Adds one claim in each given status, each created a day after the last
    pub fn with_statuses(mut self, statuses: &[ClaimStatus]) -> Self {
        let start = TemporalFixtures::start_of_year();
        for (i, status) in statuses.iter().enumerate() {
            let claim = TestClaimBuilder::new()
                .with_status(*status)
                .created_at(start + Duration::days(i as i64 * 10))
                .build();
            self.claims.push(claim);
        }
        self
    }

    pub fn build(self) -> ClaimRepository {
        let mut repository = ClaimRepository::new();
        for claim in self.claims {
            repository.add(claim);
        }
        repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder_reaches_every_status() {
        for status in ClaimStatus::ALL {
            let claim = TestClaimBuilder::new().with_status(status).build();
            assert_eq!(claim.status(), status);
        }
    }

    #[test]
    fn test_paid_claim_carries_every_timestamp() {
        let claim = TestClaimBuilder::new().with_status(ClaimStatus::Paid).build();

        let submitted = claim.submitted_date().unwrap();
        let reviewed = claim.reviewed_date().unwrap();
        let approved = claim.approved_date().unwrap();
        let paid = claim.paid_date().unwrap();
        assert!(submitted < reviewed && reviewed < approved && approved < paid);
    }

    #[test]
    fn test_builder_overrides_amount_inputs() {
        let claim = TestClaimBuilder::new()
            .with_hours(dec!(10))
            .with_hourly_rate(dec!(12.50))
            .build();
        assert_eq!(claim.amount(), dec!(125.00));
    }

    #[test]
    fn test_repository_builder() {
        let repository = TestRepositoryBuilder::new()
            .with_statuses(&[ClaimStatus::Draft, ClaimStatus::Submitted, ClaimStatus::Approved])
            .build();

        assert_eq!(repository.len(), 3);
        assert_eq!(repository.list_pending().len(), 1);
        assert_eq!(repository.list_approved_for_payment().len(), 1);
    }
}

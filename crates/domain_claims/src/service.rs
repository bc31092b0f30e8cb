//! Claim service
//!
//! Caller-facing claim operations. Every mutating call takes the acting
//! [`Actor`] and works on a copy of the stored claim, so a refused operation
//! never leaves a half-applied change in the repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use core_kernel::{ClaimId, PaymentBatchId};
use domain_directory::{Actor, UserDirectory, UserRole};

use crate::claim::{Claim, ClaimDetails, ClaimStatus};
use crate::error::ClaimError;
use crate::lifecycle::ClaimLifecycle;
use crate::repository::{ClaimRepository, ClaimStatistics};

/// Claims paid together by one HR action
#[derive(Debug, Clone, Serialize)]
pub struct PaymentBatch {
    pub id: PaymentBatchId,
    pub paid_by: String,
    pub paid_at: DateTime<Utc>,
    pub claims: Vec<Claim>,
    pub total_amount: Decimal,
}

/// Application service over the claim repository
#[derive(Debug, Default)]
pub struct ClaimService {
    repository: ClaimRepository,
}

impl ClaimService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(repository: ClaimRepository) -> Self {
        Self { repository }
    }

    /// Read access for queries and reports
    pub fn repository(&self) -> &ClaimRepository {
        &self.repository
    }

    /// Creates a draft owned by the actor
    ///
    /// Only lecturers raise claims.
    pub fn create_draft(&mut self, actor: &Actor, details: ClaimDetails) -> Result<Claim, ClaimError> {
        if actor.role != UserRole::Lecturer {
            return Err(ClaimError::not_permitted(format!(
                "only lecturers can create claims; {} is a {}",
                actor.email, actor.role
            )));
        }

        let claim = Claim::draft(actor.email.clone(), details)?;
        info!(claim_id = %claim.id(), owner = %actor.email, amount = %claim.amount(), "Created draft claim");
        self.repository.add(claim.clone());
        Ok(claim)
    }

    /// Replaces the details of the actor's own draft
    pub fn edit_draft(
        &mut self,
        actor: &Actor,
        id: ClaimId,
        details: ClaimDetails,
    ) -> Result<Claim, ClaimError> {
        let mut claim = self.stored(id)?;
        if !claim.is_owned_by(&actor.email) {
            return Err(ClaimError::not_permitted(format!(
                "{} does not own claim {}",
                actor.email, id
            )));
        }

        claim.revise(details)?;
        self.repository.update(claim.clone());
        info!(claim_id = %id, amount = %claim.amount(), "Edited draft claim");
        Ok(claim)
    }

    /// Moves a claim to `target` at the current time
    pub fn transition(
        &mut self,
        actor: &Actor,
        id: ClaimId,
        target: ClaimStatus,
    ) -> Result<Claim, ClaimError> {
        self.transition_at(actor, id, target, Utc::now())
    }

    /// Moves a claim to `target` at an explicit time
    pub fn transition_at(
        &mut self,
        actor: &Actor,
        id: ClaimId,
        target: ClaimStatus,
        now: DateTime<Utc>,
    ) -> Result<Claim, ClaimError> {
        let mut claim = self.stored(id)?;
        ClaimLifecycle::transition_at(&mut claim, target, actor, now)?;
        self.repository.update(claim.clone());
        Ok(claim)
    }

    /// Pays a batch of approved claims
    ///
    /// Either every claim in the batch is paid or none is. Repeated ids are
    /// paid once.
    pub fn pay_batch(&mut self, actor: &Actor, ids: &[ClaimId]) -> Result<PaymentBatch, ClaimError> {
        let mut unique: Vec<ClaimId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }
        if unique.is_empty() {
            return Err(ClaimError::Validation("No claims selected for payment".to_string()));
        }

        let now = Utc::now();
        let mut paid = Vec::with_capacity(unique.len());
        for id in unique {
            let mut claim = self.stored(id)?;
            if let Err(e) = ClaimLifecycle::transition_at(&mut claim, ClaimStatus::Paid, actor, now) {
                warn!(claim_id = %id, actor = %actor.email, error = %e, "Payment batch refused");
                return Err(e);
            }
            paid.push(claim);
        }

        for claim in &paid {
            self.repository.update(claim.clone());
        }

        let batch = PaymentBatch {
            id: PaymentBatchId::new(),
            paid_by: actor.email.clone(),
            paid_at: now,
            total_amount: paid.iter().map(Claim::amount).sum(),
            claims: paid,
        };
        info!(
            batch_id = %batch.id,
            count = batch.claims.len(),
            total = %batch.total_amount,
            "Paid claim batch"
        );
        Ok(batch)
    }

    /// A claim the actor is allowed to see
    ///
    /// Owners see their own claims; staff see every claim.
    pub fn view(&self, actor: &Actor, id: ClaimId) -> Result<&Claim, ClaimError> {
        let claim = self
            .repository
            .find_by_id(id)
            .ok_or_else(|| ClaimError::not_found(id))?;
        if claim.is_owned_by(&actor.email) || actor.role.is_staff() {
            Ok(claim)
        } else {
            Err(ClaimError::not_permitted(format!(
                "{} cannot view claim {}",
                actor.email, id
            )))
        }
    }

    /// The actor's own claims, newest submission first
    pub fn claims_of(&self, actor: &Actor) -> Vec<&Claim> {
        self.repository.list_by_user(&actor.email)
    }

    /// Every claim the actor may see
    pub fn visible_to(&self, actor: &Actor) -> Vec<&Claim> {
        if actor.role.is_staff() {
            self.repository.list_all()
        } else {
            self.claims_of(actor)
        }
    }

    pub fn statistics(&self, directory: &UserDirectory) -> ClaimStatistics {
        self.repository.statistics(directory)
    }

    /// Adds already-built claims, e.g. demo data
    pub fn import(&mut self, claims: impl IntoIterator<Item = Claim>) {
        for claim in claims {
            self.repository.add(claim);
        }
    }

    fn stored(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.repository
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| ClaimError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lecturer() -> Actor {
        Actor::new("lecturer@university.com", UserRole::Lecturer)
    }

    fn manager() -> Actor {
        Actor::new("admin@university.com", UserRole::AcademicManager)
    }

    fn hr() -> Actor {
        Actor::new("hr@university.com", UserRole::HrManager)
    }

    fn details(hours: Decimal) -> ClaimDetails {
        ClaimDetails::new("Marking", "November 2024", hours, dec!(50))
    }

    fn approved(service: &mut ClaimService, hours: Decimal) -> ClaimId {
        let id = service.create_draft(&lecturer(), details(hours)).unwrap().id();
        service.transition(&lecturer(), id, ClaimStatus::Submitted).unwrap();
        service.transition(&manager(), id, ClaimStatus::UnderReview).unwrap();
        service.transition(&manager(), id, ClaimStatus::Approved).unwrap();
        id
    }

    #[test]
    fn test_only_lecturers_create_claims() {
        let mut service = ClaimService::new();
        let result = service.create_draft(&hr(), details(dec!(1)));
        assert!(matches!(result, Err(ClaimError::NotPermitted(_))));
        assert!(service.repository().is_empty());
    }

    #[test]
    fn test_edit_draft_requires_owner() {
        let mut service = ClaimService::new();
        let id = service.create_draft(&lecturer(), details(dec!(2))).unwrap().id();
        let other = Actor::new("other@university.com", UserRole::Lecturer);

        let result = service.edit_draft(&other, id, details(dec!(3)));
        assert!(matches!(result, Err(ClaimError::NotPermitted(_))));
    }

    #[test]
    fn test_edit_after_submit_refused() {
        let mut service = ClaimService::new();
        let id = service.create_draft(&lecturer(), details(dec!(2))).unwrap().id();
        service.transition(&lecturer(), id, ClaimStatus::Submitted).unwrap();

        let result = service.edit_draft(&lecturer(), id, details(dec!(3)));
        assert!(matches!(result, Err(ClaimError::NotPermitted(_))));
        assert_eq!(service.repository().find_by_id(id).unwrap().hours(), dec!(2));
    }

    #[test]
    fn test_transition_unknown_claim() {
        let mut service = ClaimService::new();
        let result = service.transition(&manager(), ClaimId::new(), ClaimStatus::UnderReview);
        assert!(matches!(result, Err(ClaimError::NotFound(_))));
    }

    #[test]
    fn test_pay_batch_is_all_or_nothing() {
        let mut service = ClaimService::new();
        let first = approved(&mut service, dec!(10));
        let draft = service.create_draft(&lecturer(), details(dec!(4))).unwrap().id();

        let result = service.pay_batch(&hr(), &[first, draft]);

        assert!(matches!(result, Err(ClaimError::InvalidTransition { .. })));
        assert_eq!(
            service.repository().find_by_id(first).unwrap().status(),
            ClaimStatus::Approved
        );
    }

    #[test]
    fn test_pay_batch_totals_and_dedupes() {
        let mut service = ClaimService::new();
        let a = approved(&mut service, dec!(10));
        let b = approved(&mut service, dec!(20));

        let batch = service.pay_batch(&hr(), &[a, b, a]).unwrap();

        assert_eq!(batch.claims.len(), 2);
        assert_eq!(batch.total_amount, dec!(1500));
        assert!(service.repository().list_approved_for_payment().is_empty());
    }

    #[test]
    fn test_pay_batch_empty_selection() {
        let mut service = ClaimService::new();
        assert!(matches!(service.pay_batch(&hr(), &[]), Err(ClaimError::Validation(_))));
    }

    #[test]
    fn test_view_and_visibility() {
        let mut service = ClaimService::new();
        let id = service.create_draft(&lecturer(), details(dec!(1))).unwrap().id();
        let other = Actor::new("other@university.com", UserRole::Lecturer);

        assert!(service.view(&lecturer(), id).is_ok());
        assert!(service.view(&hr(), id).is_ok());
        assert!(matches!(service.view(&other, id), Err(ClaimError::NotPermitted(_))));
        assert!(service.visible_to(&other).is_empty());
        assert_eq!(service.visible_to(&manager()).len(), 1);
    }
}

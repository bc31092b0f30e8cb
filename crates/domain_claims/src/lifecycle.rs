//! Claim lifecycle
//!
//! The transition table and the capability each edge requires:
//!
//! | From                    | To          | Capability |
//! |-------------------------|-------------|------------|
//! | Draft                   | Submitted   | Owner      |
//! | Submitted               | UnderReview | Reviewer   |
//! | UnderReview             | Approved    | Reviewer   |
//! | Approved                | Paid        | Payer      |
//! | Submitted / UnderReview | Rejected    | Reviewer   |
//!
//! Reviewers are program coordinators and academic managers; the only payer
//! is the HR manager. Paid and Rejected are terminal.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use domain_directory::Actor;

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;

/// What an actor must be to fire a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Capability {
    /// The claim's owner
    Owner,
    /// A program coordinator or academic manager
    Reviewer,
    /// An HR manager
    Payer,
}

impl Capability {
    /// Returns true if the actor holds this capability for the claim
    pub fn held_by(&self, actor: &Actor, claim: &Claim) -> bool {
        match self {
            Capability::Owner => claim.is_owned_by(&actor.email),
            Capability::Reviewer => actor.role.is_reviewer(),
            Capability::Payer => actor.role.is_payer(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Capability::Owner => "only the claim owner",
            Capability::Reviewer => "only a program coordinator or academic manager",
            Capability::Payer => "only an HR manager",
        }
    }
}

/// The claim state machine
pub struct ClaimLifecycle;

impl ClaimLifecycle {
    /// The capability required for an edge, or `None` if the edge does not exist
    pub fn required_capability(from: ClaimStatus, to: ClaimStatus) -> Option<Capability> {
        use ClaimStatus::*;
        match (from, to) {
            (Draft, Submitted) => Some(Capability::Owner),
            (Submitted, UnderReview)
            | (UnderReview, Approved)
            | (Submitted, Rejected)
            | (UnderReview, Rejected) => Some(Capability::Reviewer),
            (Approved, Paid) => Some(Capability::Payer),
            _ => None,
        }
    }

    /// Returns true if the table has an edge from `from` to `to`
    pub fn is_edge(from: ClaimStatus, to: ClaimStatus) -> bool {
        Self::required_capability(from, to).is_some()
    }

    /// Statuses reachable from `from` in one step
    pub fn next_statuses(from: ClaimStatus) -> Vec<ClaimStatus> {
        ClaimStatus::ALL
            .into_iter()
            .filter(|to| Self::is_edge(from, *to))
            .collect()
    }

    /// Statuses this actor could move the claim to right now
    pub fn available_to(claim: &Claim, actor: &Actor) -> Vec<ClaimStatus> {
        Self::next_statuses(claim.status())
            .into_iter()
            .filter(|to| Self::check(claim, *to, actor).is_ok())
            .collect()
    }

    /// Checks a transition without applying it
    pub fn check(claim: &Claim, target: ClaimStatus, actor: &Actor) -> Result<(), ClaimError> {
        let from = claim.status();
        let capability = Self::required_capability(from, target).ok_or_else(|| {
            invalid(from, target, format!("no transition from {} to {}", from, target))
        })?;

        if !capability.held_by(actor, claim) {
            return Err(invalid(
                from,
                target,
                format!(
                    "{} may move a claim from {} to {}; {} is a {}",
                    capability.describe(),
                    from,
                    target,
                    actor.email,
                    actor.role
                ),
            ));
        }

        if target == ClaimStatus::Submitted {
            claim.details().validate()?;
        }

        Ok(())
    }

    /// Applies a transition at the current time
    pub fn transition(
        claim: &mut Claim,
        target: ClaimStatus,
        actor: &Actor,
    ) -> Result<(), ClaimError> {
        Self::transition_at(claim, target, actor, Utc::now())
    }

    /// Applies a transition at an explicit time
    ///
    /// On any error the claim is left exactly as it was.
    pub fn transition_at(
        claim: &mut Claim,
        target: ClaimStatus,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        if let Err(e) = Self::check(claim, target, actor) {
            debug!(claim_id = %claim.id(), from = %claim.status(), to = %target, actor = %actor.email, error = %e, "Transition refused");
            return Err(e);
        }

        let from = claim.status;
        match target {
            ClaimStatus::Submitted => {
                claim.submitted_date = Some(now);
            }
            ClaimStatus::UnderReview => {
                claim.reviewed_by = Some(actor.email.clone());
                claim.reviewed_date = Some(now);
            }
            ClaimStatus::Approved => {
                claim.approved_by = Some(actor.email.clone());
                claim.approved_date = Some(now);
            }
            ClaimStatus::Paid => {
                claim.paid_date = Some(now);
            }
            ClaimStatus::Rejected | ClaimStatus::Draft => {}
        }
        claim.status = target;
        claim.updated_at = now;

        info!(
            claim_id = %claim.id(),
            from = %from,
            to = %target,
            actor = %actor.email,
            "Claim status changed"
        );
        Ok(())
    }
}

fn invalid(from: ClaimStatus, to: ClaimStatus, reason: String) -> ClaimError {
    ClaimError::InvalidTransition {
        from: from.to_string(),
        to: to.to_string(),
        reason,
    }
}

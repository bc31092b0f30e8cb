//! Demo claims for the default lecturer account
//!
//! Built through the lifecycle so each claim carries the timestamps and
//! reviewer fields its status implies.

use chrono::{DateTime, Duration, Utc};
use rust_decimal_macros::dec;

use domain_directory::{Actor, UserRole};

use crate::claim::{Claim, ClaimDetails, ClaimStatus};
use crate::error::ClaimError;
use crate::lifecycle::ClaimLifecycle;

pub const SAMPLE_LECTURER: &str = "lecturer@university.com";
pub const SAMPLE_COORDINATOR: &str = "coordinator@university.com";
pub const SAMPLE_MANAGER: &str = "admin@university.com";

/// Three claims: September approved, October under review, November draft
pub fn sample_claims(now: DateTime<Utc>) -> Result<Vec<Claim>, ClaimError> {
    let lecturer = Actor::new(SAMPLE_LECTURER, UserRole::Lecturer);
    let coordinator = Actor::new(SAMPLE_COORDINATOR, UserRole::ProgramCoordinator);
    let manager = Actor::new(SAMPLE_MANAGER, UserRole::AcademicManager);

    let mut september = Claim::draft_at(
        SAMPLE_LECTURER,
        ClaimDetails::new("September Teaching Hours", "September 2024", dec!(40), dec!(130))
            .with_description("Lectures and tutorials for Programming 1"),
        now - Duration::days(35),
    )?;
    ClaimLifecycle::transition_at(&mut september, ClaimStatus::Submitted, &lecturer, now - Duration::days(30))?;
    ClaimLifecycle::transition_at(&mut september, ClaimStatus::UnderReview, &coordinator, now - Duration::days(27))?;
    ClaimLifecycle::transition_at(&mut september, ClaimStatus::Approved, &manager, now - Duration::days(25))?;

    let mut october = Claim::draft_at(
        SAMPLE_LECTURER,
        ClaimDetails::new("October Teaching Hours", "October 2024", dec!(45), dec!(130))
            .with_description("Lectures, tutorials and lab supervision"),
        now - Duration::days(12),
    )?;
    ClaimLifecycle::transition_at(&mut october, ClaimStatus::Submitted, &lecturer, now - Duration::days(10))?;
    ClaimLifecycle::transition_at(&mut october, ClaimStatus::UnderReview, &coordinator, now - Duration::days(8))?;

    let november = Claim::draft_at(
        SAMPLE_LECTURER,
        ClaimDetails::new("November Teaching Hours", "November 2024", dec!(35), dec!(130))
            .with_description("Lectures and exam preparation"),
        now - Duration::days(2),
    )?;

    Ok(vec![september, october, november])
}

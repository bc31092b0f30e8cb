//! Pre-built Test Fixtures
//!
//! Ready-to-use actors, directories and claim details. Emails and
//! passwords match the accounts seeded into an empty directory.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, DatePeriod};
use domain_claims::ClaimDetails;
use domain_directory::{Actor, InMemoryUserStore, User, UserDirectory, UserRole};

pub const LECTURER_EMAIL: &str = "lecturer@university.com";
pub const COORDINATOR_EMAIL: &str = "coordinator@university.com";
pub const MANAGER_EMAIL: &str = "admin@university.com";
pub const HR_EMAIL: &str = "hr@university.com";

/// Fixture for the seeded accounts
pub struct UserFixtures;

impl UserFixtures {
    pub fn lecturer() -> Actor {
        Actor::new(LECTURER_EMAIL, UserRole::Lecturer)
    }

    pub fn coordinator() -> Actor {
        Actor::new(COORDINATOR_EMAIL, UserRole::ProgramCoordinator)
    }

    pub fn manager() -> Actor {
        Actor::new(MANAGER_EMAIL, UserRole::AcademicManager)
    }

    pub fn hr() -> Actor {
        Actor::new(HR_EMAIL, UserRole::HrManager)
    }

    /// A lecturer that is not among the seeded accounts
    pub fn second_lecturer() -> User {
        User::new(
            "second.lecturer@university.com",
            "Second Lecturer",
            UserRole::Lecturer,
            "Mathematics",
            "second123",
        )
    }

    /// A directory seeded with the default accounts
    pub fn directory() -> UserDirectory {
        UserDirectory::open(InMemoryUserStore::new())
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Creation time used by the claim builder (Jan 1, 2024)
    pub fn start_of_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    /// Mid-year timestamp
    pub fn mid_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// Calendar year 2024
    pub fn year_2024() -> DatePeriod {
        DatePeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .unwrap()
    }

    /// January 2024
    pub fn january_2024() -> DatePeriod {
        DatePeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap()
    }
}

/// Fixture for claim details
pub struct DetailsFixtures;

impl DetailsFixtures {
    /// 40 hours at 130.00 (5200.00)
    pub fn september_teaching() -> ClaimDetails {
        ClaimDetails::new("September Teaching Hours", "September 2024", dec!(40), dec!(130))
            .with_description("Lectures and tutorials")
    }

    /// The smallest valid claim (1 hour at 0.01)
    pub fn minimal() -> ClaimDetails {
        ClaimDetails::new("Minimal", "January 2024", dec!(1), dec!(0.01))
    }

    /// Details with the given hours and rate
    pub fn hours_at(hours: Decimal, hourly_rate: Decimal) -> ClaimDetails {
        ClaimDetails::new("Teaching Hours", "January 2024", hours, hourly_rate)
    }

    /// Hours beyond the monthly maximum
    pub fn too_many_hours() -> ClaimDetails {
        ClaimDetails::new("Overtime", "January 2024", dec!(745), dec!(50))
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// An id no repository will contain
    pub fn unknown_claim_id() -> ClaimId {
        ClaimId::new()
    }
}

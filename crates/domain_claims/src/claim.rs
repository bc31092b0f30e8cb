//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use domain_directory::same_email;

use crate::error::ClaimError;

pub const MIN_HOURS: Decimal = dec!(1);
pub const MAX_HOURS: Decimal = dec!(744);
pub const MIN_HOURLY_RATE: Decimal = dec!(0.01);
pub const MAX_HOURLY_RATE: Decimal = dec!(1000);
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Saved by the lecturer, not yet sent
    Draft,
    /// Sent for review
    Submitted,
    /// Picked up by a coordinator or manager
    UnderReview,
    /// Approved and waiting for payment
    Approved,
    /// Rejected by a reviewer
    Rejected,
    /// Paid by HR
    Paid,
}

impl ClaimStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ClaimStatus; 6] = [
        ClaimStatus::Draft,
        ClaimStatus::Submitted,
        ClaimStatus::UnderReview,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::Paid,
    ];

    /// Returns true if no transition leaves this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Paid | ClaimStatus::Rejected)
    }

    /// Returns true while the claim waits on a reviewer
    pub fn is_pending_review(&self) -> bool {
        matches!(self, ClaimStatus::Submitted | ClaimStatus::UnderReview)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "Draft",
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::UnderReview => "UnderReview",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Paid => "Paid",
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClaimError::Validation(format!("Unknown claim status: {}", s)))
    }
}

/// The editable part of a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDetails {
    pub title: String,
    /// Month label, e.g. "September 2024"
    pub month_year: String,
    pub hours: Decimal,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_paths: Vec<String>,
}

impl ClaimDetails {
    /// Creates details without description or attachments
    pub fn new(
        title: impl Into<String>,
        month_year: impl Into<String>,
        hours: Decimal,
        hourly_rate: Decimal,
    ) -> Self {
        Self {
            title: title.into(),
            month_year: month_year.into(),
            hours,
            hourly_rate,
            description: String::new(),
            file_paths: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_file_paths(mut self, file_paths: Vec<String>) -> Self {
        self.file_paths = file_paths;
        self
    }

    /// Checks every field rule, reporting all failures at once
    pub fn validate(&self) -> Result<(), ClaimError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            errors.push(format!("Title cannot exceed {} characters", MAX_TITLE_LEN));
        }
        if self.month_year.trim().is_empty() {
            errors.push("Month/Year is required".to_string());
        }
        if self.hours < MIN_HOURS || self.hours > MAX_HOURS {
            errors.push(format!(
                "Hours must be between {} and {}",
                MIN_HOURS, MAX_HOURS
            ));
        }
        if self.hourly_rate < MIN_HOURLY_RATE || self.hourly_rate > MAX_HOURLY_RATE {
            errors.push(format!(
                "Hourly rate must be between {} and {}",
                MIN_HOURLY_RATE, MAX_HOURLY_RATE
            ));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(format!(
                "Description cannot exceed {} characters",
                MAX_DESCRIPTION_LEN
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ClaimError::validation_failed(errors))
        }
    }

    /// The amount these details are worth
    pub fn amount(&self) -> Decimal {
        self.hours * self.hourly_rate
    }
}

/// A lecturer's claim for hours worked in one month
///
/// # Invariants
///
/// - `amount == hours * hourly_rate`
/// - `status` only changes through [`crate::lifecycle::ClaimLifecycle`]
/// - The date fields are set in lifecycle order and never cleared
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    pub(crate) id: ClaimId,
    pub(crate) title: String,
    pub(crate) month_year: String,
    pub(crate) hours: Decimal,
    pub(crate) hourly_rate: Decimal,
    pub(crate) amount: Decimal,
    pub(crate) status: ClaimStatus,
    pub(crate) description: String,
    pub(crate) user_email: String,
    pub(crate) submitted_date: Option<DateTime<Utc>>,
    pub(crate) reviewed_date: Option<DateTime<Utc>>,
    pub(crate) approved_date: Option<DateTime<Utc>>,
    pub(crate) paid_date: Option<DateTime<Utc>>,
    pub(crate) reviewed_by: Option<String>,
    pub(crate) approved_by: Option<String>,
    pub(crate) file_paths: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a draft owned by `owner_email`
    pub fn draft(owner_email: impl Into<String>, details: ClaimDetails) -> Result<Self, ClaimError> {
        Self::draft_at(owner_email, details, Utc::now())
    }

    /// Creates a draft with an explicit creation time
    pub fn draft_at(
        owner_email: impl Into<String>,
        details: ClaimDetails,
        now: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        details.validate()?;

        let amount = details.amount();
        Ok(Self {
            id: ClaimId::new(),
            title: details.title,
            month_year: details.month_year,
            hours: details.hours,
            hourly_rate: details.hourly_rate,
            amount,
            status: ClaimStatus::Draft,
            description: details.description,
            user_email: owner_email.into(),
            submitted_date: None,
            reviewed_date: None,
            approved_date: None,
            paid_date: None,
            reviewed_by: None,
            approved_by: None,
            file_paths: details.file_paths,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the editable fields of a draft and recomputes the amount
    ///
    /// The new details are validated first; on failure nothing changes.
    pub fn revise(&mut self, details: ClaimDetails) -> Result<(), ClaimError> {
        if self.status != ClaimStatus::Draft {
            return Err(ClaimError::not_permitted(format!(
                "claim {} is {} and can no longer be edited",
                self.id, self.status
            )));
        }
        details.validate()?;

        self.amount = details.amount();
        self.title = details.title;
        self.month_year = details.month_year;
        self.hours = details.hours;
        self.hourly_rate = details.hourly_rate;
        self.description = details.description;
        self.file_paths = details.file_paths;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// The editable fields as they stand
    pub fn details(&self) -> ClaimDetails {
        ClaimDetails {
            title: self.title.clone(),
            month_year: self.month_year.clone(),
            hours: self.hours,
            hourly_rate: self.hourly_rate,
            description: self.description.clone(),
            file_paths: self.file_paths.clone(),
        }
    }

    /// Returns true if `email` owns this claim, ignoring case
    pub fn is_owned_by(&self, email: &str) -> bool {
        same_email(&self.user_email, email)
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn month_year(&self) -> &str {
        &self.month_year
    }

    pub fn hours(&self) -> Decimal {
        self.hours
    }

    pub fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn submitted_date(&self) -> Option<DateTime<Utc>> {
        self.submitted_date
    }

    pub fn reviewed_date(&self) -> Option<DateTime<Utc>> {
        self.reviewed_date
    }

    pub fn approved_date(&self) -> Option<DateTime<Utc>> {
        self.approved_date
    }

    pub fn paid_date(&self) -> Option<DateTime<Utc>> {
        self.paid_date
    }

    pub fn reviewed_by(&self) -> Option<&str> {
        self.reviewed_by.as_deref()
    }

    pub fn approved_by(&self) -> Option<&str> {
        self.approved_by.as_deref()
    }

    pub fn file_paths(&self) -> &[String] {
        &self.file_paths
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ClaimDetails {
        ClaimDetails::new("September Teaching", "September 2024", dec!(40), dec!(130))
    }

    #[test]
    fn test_draft_computes_amount() {
        let claim = Claim::draft("lecturer@university.com", details()).unwrap();

        assert_eq!(claim.status(), ClaimStatus::Draft);
        assert_eq!(claim.amount(), dec!(5200.00));
        assert!(claim.submitted_date().is_none());
        assert!(claim.id().to_string().starts_with("CLM-"));
    }

    #[test]
    fn test_draft_rejects_invalid_details() {
        let mut bad = details();
        bad.hours = dec!(0.5);

        let result = Claim::draft("lecturer@university.com", bad);
        assert!(matches!(result, Err(ClaimError::Validation(_))));
    }

    #[test]
    fn test_validation_bounds_are_inclusive() {
        let mut d = details();
        d.hours = MAX_HOURS;
        d.hourly_rate = MIN_HOURLY_RATE;
        assert!(d.validate().is_ok());

        d.hours = MIN_HOURS;
        d.hourly_rate = MAX_HOURLY_RATE;
        assert!(d.validate().is_ok());

        d.hours = dec!(744.01);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let d = ClaimDetails::new("", "", dec!(0), dec!(0))
            .with_description("x".repeat(501));

        match d.validate() {
            Err(ClaimError::Validation(message)) => {
                assert!(message.contains("Title is required"));
                assert!(message.contains("Month/Year is required"));
                assert!(message.contains("Hours"));
                assert!(message.contains("Hourly rate"));
                assert!(message.contains("Description"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_title_length_counts_characters() {
        let mut d = details();
        d.title = "é".repeat(100);
        assert!(d.validate().is_ok());
        d.title.push('é');
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_revise_recomputes_amount() {
        let mut claim = Claim::draft("lecturer@university.com", details()).unwrap();
        let mut revised = details();
        revised.hours = dec!(12.5);
        revised.hourly_rate = dec!(80);

        claim.revise(revised).unwrap();
        assert_eq!(claim.amount(), dec!(1000));
        assert_eq!(claim.hours(), dec!(12.5));
    }

    #[test]
    fn test_revise_leaves_claim_unchanged_on_failure() {
        let mut claim = Claim::draft("lecturer@university.com", details()).unwrap();
        let before = claim.clone();
        let mut revised = details();
        revised.hourly_rate = dec!(1000.01);

        assert!(claim.revise(revised).is_err());
        assert_eq!(claim, before);
    }

    #[test]
    fn test_ownership_ignores_case() {
        let claim = Claim::draft("lecturer@university.com", details()).unwrap();
        assert!(claim.is_owned_by("Lecturer@University.com"));
        assert!(!claim.is_owned_by("other@university.com"));
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("underreview".parse::<ClaimStatus>().unwrap(), ClaimStatus::UnderReview);
        assert_eq!(" Paid ".parse::<ClaimStatus>().unwrap(), ClaimStatus::Paid);
        assert!("Closed".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_file_paths_kept_in_order() {
        let d = details().with_file_paths(vec!["timesheet.pdf".to_string(), "notes.docx".to_string()]);
        let claim = Claim::draft("lecturer@university.com", d).unwrap();

        assert_eq!(claim.file_paths().to_vec(), vec!["timesheet.pdf".to_string(), "notes.docx".to_string()]);
    }

    #[test]
    fn test_claim_serializes_amount() {
        let claim = Claim::draft("lecturer@university.com", details()).unwrap();
        let json = serde_json::to_value(&claim).unwrap();

        assert_eq!(json["status"], "Draft");
        assert_eq!(json["user_email"], "lecturer@university.com");
        assert!(json.get("amount").is_some());
    }
}

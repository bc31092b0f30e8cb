//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_claims::{Claim, ClaimDetails, ClaimStatus, PaymentBatch};

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub title: String,
    pub month_year: String,
    pub hours: Decimal,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_paths: Vec<String>,
}

impl From<ClaimRequest> for ClaimDetails {
    fn from(request: ClaimRequest) -> Self {
        ClaimDetails::new(request.title, request.month_year, request.hours, request.hourly_rate)
            .with_description(request.description)
            .with_file_paths(request.file_paths)
    }
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentRequest {
    #[validate(length(min = 1, message = "Select at least one claim"))]
    pub claim_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: String,
    pub title: String,
    pub month_year: String,
    pub hours: Decimal,
    pub hourly_rate: Decimal,
    pub amount: Decimal,
    pub status: ClaimStatus,
    pub description: String,
    pub user_email: String,
    pub submitted_date: Option<DateTime<Utc>>,
    pub reviewed_date: Option<DateTime<Utc>>,
    pub approved_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub approved_by: Option<String>,
    pub file_paths: Vec<String>,
    /// Statuses the caller may move this claim to
    pub available_transitions: Vec<ClaimStatus>,
}

impl ClaimResponse {
    pub fn new(claim: &Claim, available_transitions: Vec<ClaimStatus>) -> Self {
        Self {
            id: claim.id().to_string(),
            title: claim.title().to_string(),
            month_year: claim.month_year().to_string(),
            hours: claim.hours(),
            hourly_rate: claim.hourly_rate(),
            amount: claim.amount(),
            status: claim.status(),
            description: claim.description().to_string(),
            user_email: claim.user_email().to_string(),
            submitted_date: claim.submitted_date(),
            reviewed_date: claim.reviewed_date(),
            approved_date: claim.approved_date(),
            paid_date: claim.paid_date(),
            reviewed_by: claim.reviewed_by().map(String::from),
            approved_by: claim.approved_by().map(String::from),
            file_paths: claim.file_paths().to_vec(),
            available_transitions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentBatchResponse {
    pub id: String,
    pub paid_by: String,
    pub paid_at: DateTime<Utc>,
    pub claim_ids: Vec<String>,
    pub total_amount: Decimal,
}

impl From<PaymentBatch> for PaymentBatchResponse {
    fn from(batch: PaymentBatch) -> Self {
        Self {
            id: batch.id.to_string(),
            paid_by: batch.paid_by,
            paid_at: batch.paid_at,
            claim_ids: batch.claims.iter().map(|c| c.id().to_string()).collect(),
            total_amount: batch.total_amount,
        }
    }
}

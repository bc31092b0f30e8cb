//! Delimited-text export
//!
//! Claim export layout:
//!
//! ```text
//! Claim ID,Title,Month/Year,Lecturer Email,Hours,Hourly Rate,Amount,Status,Submitted Date,Approved Date,Description
//! <one row per claim, oldest submission first, never-submitted last>
//! Summary
//! Draft,<count>
//! ... one row per status ...
//! Total Claims,<n>
//! Total Hours,<h>
//! Total Amount,<a>
//! Approved Or Paid Amount,<x>
//! ```
//!
//! Dates are `YYYY-MM-DD`. Money is written exactly, padded to at least two
//! decimals and never rounded, so the rows add up to the summary lines.
//! Quoting follows RFC 4180 via the `csv` writer.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use domain_claims::{Claim, ClaimStatus};

use crate::error::ReportError;
use crate::summary::summarize;

pub const CLAIM_HEADER: [&str; 11] = [
    "Claim ID",
    "Title",
    "Month/Year",
    "Lecturer Email",
    "Hours",
    "Hourly Rate",
    "Amount",
    "Status",
    "Submitted Date",
    "Approved Date",
    "Description",
];

pub const PAYMENT_HEADER: [&str; 4] = ["Lecturer", "Title", "Amount", "Approved Date"];

/// Marker row separating claim rows from the summary block
pub const SUMMARY_MARKER: &str = "Summary";

/// Renders claims and their summary as delimited text
pub fn to_delimited_text<'a>(
    claims: impl IntoIterator<Item = &'a Claim>,
) -> Result<String, ReportError> {
    let mut rows: Vec<&Claim> = claims.into_iter().collect();
    rows.sort_by(|a, b| oldest_first(a.submitted_date(), b.submitted_date()));

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(CLAIM_HEADER)?;
    for claim in &rows {
        writer.write_record([
            claim.id().to_string(),
            claim.title().to_string(),
            claim.month_year().to_string(),
            claim.user_email().to_string(),
            claim.hours().normalize().to_string(),
            money(claim.hourly_rate()),
            money(claim.amount()),
            claim.status().to_string(),
            date(claim.submitted_date()),
            date(claim.approved_date()),
            claim.description().to_string(),
        ])?;
    }

    let summary = summarize(rows.iter().copied());
    writer.write_record([SUMMARY_MARKER])?;
    for status in ClaimStatus::ALL {
        writer.write_record([status.to_string(), summary.count_of(status).to_string()])?;
    }
    writer.write_record(["Total Claims".to_string(), summary.count.to_string()])?;
    writer.write_record(["Total Hours".to_string(), summary.total_hours.normalize().to_string()])?;
    writer.write_record(["Total Amount".to_string(), money(summary.total_amount)])?;
    writer.write_record([
        "Approved Or Paid Amount".to_string(),
        money(summary.approved_or_paid_amount),
    ])?;

    debug!(rows = rows.len(), "Exported claims");
    finish(writer)
}

/// Renders the approved claims in `claims` as a payment file for HR
///
/// Rows are ordered by approval date, oldest first.
pub fn payments_to_delimited_text<'a>(
    claims: impl IntoIterator<Item = &'a Claim>,
) -> Result<String, ReportError> {
    let mut rows: Vec<&Claim> = claims
        .into_iter()
        .filter(|c| c.status() == ClaimStatus::Approved)
        .collect();
    rows.sort_by(|a, b| oldest_first(a.approved_date(), b.approved_date()));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PAYMENT_HEADER)?;
    for claim in &rows {
        writer.write_record([
            claim.user_email().to_string(),
            claim.title().to_string(),
            money(claim.amount()),
            date(claim.approved_date()),
        ])?;
    }

    debug!(rows = rows.len(), "Exported payment file");
    finish(writer)
}

fn finish(mut writer: csv::Writer<Vec<u8>>) -> Result<String, ReportError> {
    writer
        .flush()
        .map_err(|e| ReportError::Export(format!("Failed to flush CSV output: {}", e)))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Export(format!("Failed to get CSV output: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Export(e.to_string()))
}

fn money(amount: Decimal) -> String {
    let exact = amount.normalize();
    if exact.scale() < 2 {
        format!("{:.2}", exact)
    } else {
        exact.to_string()
    }
}

fn date(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d").to_string()).unwrap_or_default()
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
    use domain_claims::ClaimDetails;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_pads_to_two_decimals() {
        assert_eq!(money(dec!(5200)), "5200.00");
        assert_eq!(money(dec!(0.5)), "0.50");
        assert_eq!(money(dec!(749.9700)), "749.97");
    }

    #[test]
    fn test_money_keeps_sub_cent_digits() {
        assert_eq!(money(dec!(0.015)), "0.015");
        assert_eq!(money(dec!(1.5) * dec!(0.01)), "0.015");
        assert_eq!(money(dec!(12.3456)), "12.3456");
    }

    #[test]
    fn test_empty_export_has_header_and_summary() {
        let text = to_delimited_text(Vec::<&Claim>::new()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Claim ID,Title,Month/Year"));
        assert_eq!(lines[1], "Summary");
        assert!(lines.contains(&"Total Claims,0"));
        assert!(lines.contains(&"Total Amount,0.00"));
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let claim = Claim::draft(
            "lecturer@university.com",
            ClaimDetails::new("Labs, tutorials", "May 2024", dec!(1), dec!(10))
                .with_description("said \"extra\"\nsecond line"),
        )
        .unwrap();

        let text = to_delimited_text([&claim]).unwrap();

        assert!(text.contains("\"Labs, tutorials\""));
        assert!(text.contains("\"said \"\"extra\"\"\nsecond line\""));
    }
}

//! Report DTOs

use chrono::NaiveDate;
use serde::Deserialize;

use core_kernel::DatePeriod;
use domain_reporting::ReportError;

/// Optional submission-date bounds, both inclusive
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRangeQuery {
    /// The period to filter by, or `None` when no bound was given
    ///
    /// With only one bound the other end is open.
    pub fn period(&self) -> Result<Option<DatePeriod>, ReportError> {
        match (self.from, self.to) {
            (None, None) => Ok(None),
            (from, to) => Ok(Some(DatePeriod::new(
                from.unwrap_or(NaiveDate::MIN),
                to.unwrap_or(NaiveDate::MAX),
            )?)),
        }
    }
}

//! Property and edge-case tests for DatePeriod

use chrono::{Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use core_kernel::{DatePeriod, TemporalError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_unbounded_period_contains_everything() {
    let period = DatePeriod::unbounded();
    assert!(period.contains(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));
    assert!(period.contains(Utc.with_ymd_and_hms(2999, 12, 31, 23, 59, 59).unwrap()));
}

#[test]
fn test_period_compares_utc_calendar_date() {
    let period = DatePeriod::new(date(2024, 9, 1), date(2024, 9, 30)).unwrap();
    assert!(period.contains(Utc.with_ymd_and_hms(2024, 9, 30, 23, 59, 59).unwrap()));
    assert!(!period.contains(Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap()));
}

#[test]
fn test_error_message_names_both_bounds() {
    let error = DatePeriod::new(date(2024, 5, 2), date(2024, 5, 1)).unwrap_err();
    assert_eq!(
        error,
        TemporalError::InvalidPeriod {
            start: "2024-05-02".to_string(),
            end: "2024-05-01".to_string(),
        }
    );
}

proptest! {
    #[test]
    fn period_contains_its_bounds(start_offset in 0u64..20_000, length in 0u64..400) {
        let from = date(1990, 1, 1) + Days::new(start_offset);
        let to = from + Days::new(length);
        let period = DatePeriod::new(from, to).unwrap();

        prop_assert!(period.contains_date(from));
        prop_assert!(period.contains_date(to));
        prop_assert!(!period.contains_date(to + Days::new(1)));
        prop_assert!(!period.contains_date(from - Days::new(1)));
    }
}

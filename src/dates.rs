//! shared calendar arithmetic for due-date generation
//!
//! due dates are anchored to a payment day of month; whenever a month is
//! shorter than the anchor, the due day snaps to the last day of that month
//! (anchor day 31 in a 30-day month becomes day 30).

use chrono::{Datelike, NaiveDate};

use crate::errors::{PlanError, Result};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// build a date with the day snapped into the month's valid range
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    // day is within the month by construction
    NaiveDate::from_ymd_opt(year, month, day).expect("day clamped to month length")
}

/// shift a date by whole calendar months, snapping the day to
/// `min(anchor_day, days in target month)`
///
/// `months` may be negative; the backward walk of the historical
/// reconstruction uses that. a shift of zero returns the date untouched so
/// that an explicitly stored next-payment date is never re-snapped.
pub fn add_months_clamped(date: NaiveDate, months: i32, anchor_day: u8) -> NaiveDate {
    if months == 0 {
        return date;
    }
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    clamped_date(year, month, anchor_day.max(1) as u32)
}

/// parse an ISO `YYYY-MM-DD` date arriving from the persistence boundary
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| PlanError::MalformedDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28); // century, not leap
        assert_eq!(days_in_month(2000, 2), 29); // 400-year rule
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_anchor_day_snaps_to_short_month() {
        // anchor 31 into april lands on the 30th, never rolls into may
        assert_eq!(add_months_clamped(d(2024, 3, 31), 1, 31), d(2024, 4, 30));
        // anchor 31 into february lands on the 29th in a leap year
        assert_eq!(add_months_clamped(d(2024, 1, 31), 1, 31), d(2024, 2, 29));
    }

    #[test]
    fn test_anchor_recovers_after_short_month() {
        // feb 29 -> mar 31 when the anchor is 31
        assert_eq!(add_months_clamped(d(2024, 2, 29), 1, 31), d(2024, 3, 31));
    }

    #[test]
    fn test_zero_shift_is_identity() {
        // stored next-payment dates are never re-snapped
        assert_eq!(add_months_clamped(d(2024, 5, 3), 0, 31), d(2024, 5, 3));
    }

    #[test]
    fn test_backward_walk() {
        assert_eq!(add_months_clamped(d(2024, 3, 15), -1, 15), d(2024, 2, 15));
        assert_eq!(add_months_clamped(d(2024, 1, 15), -2, 15), d(2023, 11, 15));
        assert_eq!(add_months_clamped(d(2024, 3, 31), -1, 31), d(2024, 2, 29));
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(add_months_clamped(d(2024, 11, 10), 3, 10), d(2025, 2, 10));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-06-15").unwrap(), d(2024, 6, 15));
        assert!(matches!(
            parse_iso_date("15/06/2024"),
            Err(PlanError::MalformedDate { .. })
        ));
    }
}

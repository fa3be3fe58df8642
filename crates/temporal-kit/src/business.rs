//! Working-day helpers. Saturday and Sunday are the weekend; holidays are
//! not considered.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{Result, TemporalError};

/// Saturday or Sunday.
pub fn is_weekend(date: &NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday through Friday.
pub fn is_business_day(date: &NaiveDate) -> bool {
    !is_weekend(date)
}

/// Move `days` working days forward (or backward when negative), skipping
/// weekends. Zero returns `date` unchanged, even on a weekend.
///
/// ```
/// use chrono::NaiveDate;
/// use temporal_kit::business::add_business_days;
///
/// let friday = NaiveDate::from_ymd_opt(2023, 10, 6).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2023, 10, 9).unwrap();
/// assert_eq!(add_business_days(&friday, 1).unwrap(), monday);
/// ```
///
/// # Errors
///
/// [`TemporalError::OutOfRange`] if the walk leaves chrono's date range.
pub fn add_business_days(date: &NaiveDate, days: i64) -> Result<NaiveDate> {
    let step = Days::new(1);
    let mut result = *date;
    let mut remaining = days.unsigned_abs();
    while remaining > 0 {
        result = if days > 0 {
            result.checked_add_days(step)
        } else {
            result.checked_sub_days(step)
        }
        .ok_or_else(|| TemporalError::OutOfRange(format!("{days} business days from {date}")))?;
        if is_business_day(&result) {
            remaining -= 1;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── is_weekend ──────────────────────────────────────────────────────

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(&date(2023, 10, 7))); // Saturday
        assert!(is_weekend(&date(2023, 10, 8))); // Sunday
        assert!(!is_weekend(&date(2023, 10, 9))); // Monday
        assert!(!is_weekend(&date(2023, 10, 6))); // Friday
    }

    // ── add_business_days ───────────────────────────────────────────────

    #[test]
    fn test_add_within_week() {
        assert_eq!(add_business_days(&date(2023, 10, 9), 2).unwrap(), date(2023, 10, 11));
    }

    #[test]
    fn test_add_skips_weekend() {
        assert_eq!(add_business_days(&date(2023, 10, 6), 1).unwrap(), date(2023, 10, 9));
        assert_eq!(add_business_days(&date(2023, 10, 6), 3).unwrap(), date(2023, 10, 11));
    }

    #[test]
    fn test_subtract_business_days() {
        assert_eq!(add_business_days(&date(2023, 10, 11), -2).unwrap(), date(2023, 10, 9));
        assert_eq!(add_business_days(&date(2023, 10, 9), -1).unwrap(), date(2023, 10, 6));
    }

    #[test]
    fn test_add_zero_from_weekend() {
        assert_eq!(add_business_days(&date(2023, 10, 7), 0).unwrap(), date(2023, 10, 7));
    }

    #[test]
    fn test_add_from_weekend() {
        // Saturday + 1 working day is Monday.
        assert_eq!(add_business_days(&date(2023, 10, 7), 1).unwrap(), date(2023, 10, 9));
    }

    #[test]
    fn test_add_business_days_overflow() {
        assert!(add_business_days(&NaiveDate::MAX, 5).is_err());
    }
}

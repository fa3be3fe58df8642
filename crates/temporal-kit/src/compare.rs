//! Ordering across date-like kinds.
//!
//! [`compare`] defines the total order the collection and range helpers are
//! built on:
//!
//! - two zoned values compare by instant, so the same moment in different
//!   zones is equal
//! - two unzoned values that both carry a time compare by wall clock
//! - a zoned value and an unzoned date-time cannot be ordered without a zone
//!   for the latter and produce [`TemporalError::MixedZoneComparison`]
//! - if either side is a plain date, the calendar dates are compared
//!   (a zoned value contributes the date on its own wall clock)

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDateTime};

use crate::error::{Result, TemporalError};
use crate::types::{DateLike, DateValue};

// ── Ordering ────────────────────────────────────────────────────────────────

/// Compare two date-like values.
///
/// # Errors
///
/// Returns [`TemporalError::MixedZoneComparison`] when one side is zoned and
/// the other is an unzoned date-time.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use chrono::NaiveDate;
/// use temporal_kit::compare::compare;
/// use temporal_kit::DateLike;
///
/// let a = DateLike::from(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// let b = DateLike::from(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
/// assert_eq!(compare(&a, &b).unwrap(), Ordering::Less);
/// ```
pub fn compare(a: &DateLike, b: &DateLike) -> Result<Ordering> {
    match (a, b) {
        (DateLike::Zoned(x), DateLike::Zoned(y)) => Ok(x.cmp(y)),
        (DateLike::DateTime(x), DateLike::DateTime(y)) => Ok(x.cmp(y)),
        (DateLike::Zoned(_), DateLike::DateTime(_)) | (DateLike::DateTime(_), DateLike::Zoned(_)) => {
            Err(TemporalError::MixedZoneComparison)
        }
        _ => Ok(a.date().cmp(&b.date())),
    }
}

/// [`compare`] for any pair of [`DateValue`] types.
pub fn compare_values<A: DateValue, B: DateValue>(a: &A, b: &B) -> Result<Ordering> {
    compare(&a.to_date_like(), &b.to_date_like())
}

/// `a` sorts strictly before `b` under [`compare`].
///
/// # Errors
///
/// Same as [`compare`].
pub fn is_before<A: DateValue, B: DateValue>(a: &A, b: &B) -> Result<bool> {
    compare_values(a, b).map(Ordering::is_lt)
}

/// `a` sorts strictly after `b` under [`compare`].
///
/// # Errors
///
/// Same as [`compare`].
pub fn is_after<A: DateValue, B: DateValue>(a: &A, b: &B) -> Result<bool> {
    compare_values(a, b).map(Ordering::is_gt)
}

/// Equal under [`compare`]: the same instant for zoned values, the same wall
/// clock for date-times, the same day when a plain date is involved.
pub fn is_same<A: DateValue, B: DateValue>(a: &A, b: &B) -> Result<bool> {
    compare_values(a, b).map(Ordering::is_eq)
}

// ── Field equality ──────────────────────────────────────────────────────────
//
// These read each value's own wall-clock date and never normalize across
// zones.

/// Same calendar date.
pub fn is_same_day<A: DateValue, B: DateValue>(a: &A, b: &B) -> bool {
    a.to_date_like().date() == b.to_date_like().date()
}

/// Same year and month.
pub fn is_same_month<A: DateValue, B: DateValue>(a: &A, b: &B) -> bool {
    let (x, y) = (a.to_date_like().date(), b.to_date_like().date());
    x.year() == y.year() && x.month() == y.month()
}

/// Same calendar year.
pub fn is_same_year<A: DateValue, B: DateValue>(a: &A, b: &B) -> bool {
    a.to_date_like().date().year() == b.to_date_like().date().year()
}

/// Same ISO week number in the same ISO week-year.
pub fn is_same_week<A: DateValue, B: DateValue>(a: &A, b: &B) -> bool {
    a.to_date_like().date().iso_week() == b.to_date_like().date().iso_week()
}

// ── Timeline position ───────────────────────────────────────────────────────

/// Nanoseconds since the Unix epoch, reading unzoned values as UTC and plain
/// dates as midnight. Defined for every kind, unlike [`compare`].
pub(crate) fn epoch_nanos(value: &DateLike) -> i128 {
    let utc: NaiveDateTime = match value {
        DateLike::Zoned(z) => z.naive_utc(),
        other => other.wall_clock(),
    };
    let utc = utc.and_utc();
    i128::from(utc.timestamp()) * 1_000_000_000 + i128::from(utc.timestamp_subsec_nanos())
}

// ── Tests ───────────────────────────────────────────────────────────────────

//! Value kinds handled by temporal-kit.
//!
//! The date/time values themselves are chrono's: [`NaiveDate`],
//! [`NaiveTime`], [`NaiveDateTime`], `DateTime<Tz>` for zoned values and
//! `DateTime<Utc>` for instants. This module adds the sum types that tie
//! them together:
//!
//! - [`Temporal`]: any of the five kinds, as produced by [`crate::parse::parse`]
//! - [`DateLike`]: the kinds that carry a calendar date (plain date,
//!   plain date-time, zoned date-time)
//! - [`DateValue`]: trait implemented by every date-like type so generic
//!   algorithms (sorting, ranges, arithmetic) hand back the caller's own type
//! - [`DurationFields`]: a signed multi-field duration for `add`/`subtract`

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TemporalError};
use crate::math;

// ── Temporal ────────────────────────────────────────────────────────────────

/// One parsed value of any of the five kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    PlainDate(NaiveDate),
    PlainTime(NaiveTime),
    PlainDateTime(NaiveDateTime),
    Zoned(DateTime<Tz>),
    Instant(DateTime<Utc>),
}

impl Temporal {
    pub fn is_plain_date(&self) -> bool {
        matches!(self, Temporal::PlainDate(_))
    }

    pub fn is_plain_time(&self) -> bool {
        matches!(self, Temporal::PlainTime(_))
    }

    pub fn is_plain_date_time(&self) -> bool {
        matches!(self, Temporal::PlainDateTime(_))
    }

    pub fn is_zoned(&self) -> bool {
        matches!(self, Temporal::Zoned(_))
    }

    pub fn is_instant(&self) -> bool {
        matches!(self, Temporal::Instant(_))
    }

    /// Plain date, plain date-time or zoned date-time.
    pub fn is_date_like(&self) -> bool {
        self.into_date_like().is_some()
    }

    /// Plain time, plain date-time or zoned date-time.
    pub fn is_time_like(&self) -> bool {
        matches!(
            self,
            Temporal::PlainTime(_) | Temporal::PlainDateTime(_) | Temporal::Zoned(_)
        )
    }

    /// Narrow to a [`DateLike`]. Plain times and instants have no calendar
    /// date of their own and yield `None`.
    pub fn into_date_like(self) -> Option<DateLike> {
        match self {
            Temporal::PlainDate(d) => Some(DateLike::Date(d)),
            Temporal::PlainDateTime(dt) => Some(DateLike::DateTime(dt)),
            Temporal::Zoned(z) => Some(DateLike::Zoned(z)),
            Temporal::PlainTime(_) | Temporal::Instant(_) => None,
        }
    }
}

impl From<DateLike> for Temporal {
    fn from(value: DateLike) -> Self {
        match value {
            DateLike::Date(d) => Temporal::PlainDate(d),
            DateLike::DateTime(dt) => Temporal::PlainDateTime(dt),
            DateLike::Zoned(z) => Temporal::Zoned(z),
        }
    }
}

// ── DateLike ────────────────────────────────────────────────────────────────

/// A value that has a year, month and day; optionally a time; optionally a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLike {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Zoned(DateTime<Tz>),
}

impl DateLike {
    /// Whether the value carries an hour component.
    pub fn has_time(&self) -> bool {
        !matches!(self, DateLike::Date(_))
    }

    /// The zone of a zoned value.
    pub fn zone(&self) -> Option<Tz> {
        match self {
            DateLike::Zoned(z) => Some(z.timezone()),
            _ => None,
        }
    }

    /// The calendar date as seen on the value's own wall clock.
    pub fn date(&self) -> NaiveDate {
        match self {
            DateLike::Date(d) => *d,
            DateLike::DateTime(dt) => dt.date(),
            DateLike::Zoned(z) => z.date_naive(),
        }
    }

    /// The wall-clock date-time; plain dates read as midnight.
    pub fn wall_clock(&self) -> NaiveDateTime {
        match self {
            DateLike::Date(d) => d.and_time(NaiveTime::MIN),
            DateLike::DateTime(dt) => *dt,
            DateLike::Zoned(z) => z.naive_local(),
        }
    }
}

impl From<NaiveDate> for DateLike {
    fn from(value: NaiveDate) -> Self {
        DateLike::Date(value)
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(value: NaiveDateTime) -> Self {
        DateLike::DateTime(value)
    }
}

impl From<DateTime<Tz>> for DateLike {
    fn from(value: DateTime<Tz>) -> Self {
        DateLike::Zoned(value)
    }
}

// ── DateValue ───────────────────────────────────────────────────────────────

/// Implemented by every date-like type so that generic operations can compare
/// values through [`DateLike`] and still return the caller's concrete type.
pub trait DateValue: Clone {
    fn to_date_like(&self) -> DateLike;

    /// Rebuild `Self` from a value of the same kind; `None` on a kind mismatch.
    fn from_date_like(value: DateLike) -> Option<Self>;

    /// Calendar-correct addition of `duration`.
    fn add_fields(&self, duration: &DurationFields) -> Result<Self>;
}

impl DateValue for NaiveDate {
    fn to_date_like(&self) -> DateLike {
        DateLike::Date(*self)
    }

    fn from_date_like(value: DateLike) -> Option<Self> {
        match value {
            DateLike::Date(d) => Some(d),
            _ => None,
        }
    }

    fn add_fields(&self, duration: &DurationFields) -> Result<Self> {
        math::add_to_date(*self, duration)
    }
}

impl DateValue for NaiveDateTime {
    fn to_date_like(&self) -> DateLike {
        DateLike::DateTime(*self)
    }

    fn from_date_like(value: DateLike) -> Option<Self> {
        match value {
            DateLike::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    fn add_fields(&self, duration: &DurationFields) -> Result<Self> {
        math::add_to_date_time(*self, duration)
    }
}

impl DateValue for DateTime<Tz> {
    fn to_date_like(&self) -> DateLike {
        DateLike::Zoned(*self)
    }

    fn from_date_like(value: DateLike) -> Option<Self> {
        match value {
            DateLike::Zoned(z) => Some(z),
            _ => None,
        }
    }

    fn add_fields(&self, duration: &DurationFields) -> Result<Self> {
        math::add_to_zoned(*self, duration)
    }
}

impl DateValue for DateLike {
    fn to_date_like(&self) -> DateLike {
        *self
    }

    fn from_date_like(value: DateLike) -> Option<Self> {
        Some(value)
    }

    fn add_fields(&self, duration: &DurationFields) -> Result<Self> {
        match self {
            DateLike::Date(d) => math::add_to_date(*d, duration).map(DateLike::Date),
            DateLike::DateTime(dt) => math::add_to_date_time(*dt, duration).map(DateLike::DateTime),
            DateLike::Zoned(z) => math::add_to_zoned(*z, duration).map(DateLike::Zoned),
        }
    }
}

// ── DurationFields ──────────────────────────────────────────────────────────

/// A signed duration expressed field by field.
///
/// Years, months, weeks and days are calendar units: they move the wall
/// clock and are resolved against the calendar (month ends clamp, DST is
/// re-resolved). Hours and smaller are exact units added on the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationFields {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    pub microseconds: i64,
    pub nanoseconds: i64,
}

impl DurationFields {
    /// A duration of whole calendar days.
    pub fn of_days(days: i64) -> Self {
        DurationFields {
            days,
            ..Default::default()
        }
    }

    /// A duration of whole weeks.
    pub fn of_weeks(weeks: i64) -> Self {
        DurationFields {
            weeks,
            ..Default::default()
        }
    }

    /// A duration of calendar months; month ends clamp when added.
    pub fn of_months(months: i64) -> Self {
        DurationFields {
            months,
            ..Default::default()
        }
    }

    /// A duration of exact hours.
    pub fn of_hours(hours: i64) -> Self {
        DurationFields {
            hours,
            ..Default::default()
        }
    }

    /// Every field is zero.
    pub fn is_zero(&self) -> bool {
        *self == DurationFields::default()
    }

    /// Every field with its sign flipped.
    ///
    /// # Errors
    ///
    /// [`TemporalError::OutOfRange`] if a field is `i64::MIN`.
    pub fn negated(&self) -> Result<Self> {
        let neg = |field: i64, name: &str| {
            field
                .checked_neg()
                .ok_or_else(|| TemporalError::OutOfRange(format!("cannot negate {name} = {field}")))
        };
        Ok(DurationFields {
            years: neg(self.years, "years")?,
            months: neg(self.months, "months")?,
            weeks: neg(self.weeks, "weeks")?,
            days: neg(self.days, "days")?,
            hours: neg(self.hours, "hours")?,
            minutes: neg(self.minutes, "minutes")?,
            seconds: neg(self.seconds, "seconds")?,
            milliseconds: neg(self.milliseconds, "milliseconds")?,
            microseconds: neg(self.microseconds, "microseconds")?,
            nanoseconds: neg(self.nanoseconds, "nanoseconds")?,
        })
    }

    /// Total calendar months (`years * 12 + months`).
    pub(crate) fn total_months(&self) -> Option<i64> {
        self.years.checked_mul(12)?.checked_add(self.months)
    }

    /// Total calendar days (`weeks * 7 + days`).
    pub(crate) fn total_days(&self) -> Option<i64> {
        self.weeks.checked_mul(7)?.checked_add(self.days)
    }

    /// Total of the exact (sub-day) fields in nanoseconds.
    pub(crate) fn exact_nanos(&self) -> i128 {
        i128::from(self.hours) * 3_600_000_000_000
            + i128::from(self.minutes) * 60_000_000_000
            + i128::from(self.seconds) * 1_000_000_000
            + i128::from(self.milliseconds) * 1_000_000
            + i128::from(self.microseconds) * 1_000
            + i128::from(self.nanoseconds)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

//! Conversions between kinds, and the current date/time from a [`Clock`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::clock::Clock;
use crate::error::{ParseTarget, Result, TemporalError};
use crate::parse::parse_iso_by_shape;
use crate::timezone::{parse_timezone, resolve_local};
use crate::types::{DateLike, Temporal};

// ── Now ─────────────────────────────────────────────────────────────────────

/// The current moment in the clock's zone.
pub fn now(clock: &impl Clock) -> DateTime<Tz> {
    clock.now().with_timezone(&clock.time_zone())
}

/// The current moment in `zone`.
///
/// # Errors
///
/// [`TemporalError::InvalidTimezone`] if `zone` is unknown.
pub fn now_in(clock: &impl Clock, zone: &str) -> Result<DateTime<Tz>> {
    Ok(clock.now().with_timezone(&parse_timezone(zone)?))
}

/// Today's date in the clock's zone.
pub fn today(clock: &impl Clock) -> NaiveDate {
    now(clock).date_naive()
}

/// Today's date in `zone`.
pub fn today_in(clock: &impl Clock, zone: &str) -> Result<NaiveDate> {
    now_in(clock, zone).map(|z| z.date_naive())
}

// ── ISO strings ─────────────────────────────────────────────────────────────

/// Parse a strict ISO 8601 date, date-time, zoned date-time or instant.
///
/// Unlike [`crate::parse::parse`], common formats (`30.11.2025`) and bare
/// times are not accepted.
pub fn from_iso(input: &str) -> Result<Temporal> {
    parse_iso_by_shape(input.trim())
        .filter(|value| !value.is_plain_time())
        .ok_or_else(|| TemporalError::unparsable(input, ParseTarget::Any))
}

// ── Kind conversions ────────────────────────────────────────────────────────

/// The calendar date on the value's own wall clock.
pub fn to_plain_date(value: &DateLike) -> NaiveDate {
    value.date()
}

/// The wall-clock date-time of a value that has a time.
///
/// # Errors
///
/// [`TemporalError::MissingTime`] for a plain date; use
/// [`NaiveDate::and_time`] to pick a time explicitly.
pub fn to_plain_date_time(value: &DateLike) -> Result<NaiveDateTime> {
    match value {
        DateLike::Date(d) => Err(TemporalError::MissingTime(format!(
            "{d} has no time of day to convert to a date-time"
        ))),
        other => Ok(other.wall_clock()),
    }
}

/// Place a value in a timezone.
///
/// - zoned values move to `zone` (same instant) or stay as they are when no
///   zone is given
/// - plain date-times are resolved in `zone` with the "compatible" rule
/// - plain dates become the start of that day in `zone`
///
/// # Errors
///
/// [`TemporalError::MissingTimeZone`] when a plain value is given no zone,
/// [`TemporalError::InvalidTimezone`] when `zone` is unknown.
pub fn to_zoned(value: &DateLike, zone: Option<&str>) -> Result<DateTime<Tz>> {
    let tz = zone.map(parse_timezone).transpose()?;
    match (value, tz) {
        (DateLike::Zoned(z), Some(tz)) => Ok(z.with_timezone(&tz)),
        (DateLike::Zoned(z), None) => Ok(*z),
        (DateLike::DateTime(dt), Some(tz)) => resolve_local(dt, tz),
        (DateLike::Date(d), Some(tz)) => resolve_local(&d.and_time(NaiveTime::MIN), tz),
        (plain, None) => Err(TemporalError::MissingTimeZone(format!(
            "{plain:?} is not zoned; pass a timezone to convert it"
        ))),
    }
}

/// The exact instant of a zoned value.
///
/// # Errors
///
/// [`TemporalError::MissingTimeZone`] for plain values, which have no
/// position on the timeline.
pub fn to_instant(value: &DateLike) -> Result<DateTime<Utc>> {
    match value {
        DateLike::Zoned(z) => Ok(z.with_timezone(&Utc)),
        plain => Err(TemporalError::MissingTimeZone(format!(
            "{plain:?} is not zoned; convert it with to_zoned first"
        ))),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

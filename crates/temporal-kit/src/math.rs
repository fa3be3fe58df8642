//! Calendar arithmetic: add/subtract durations, start/end of a unit.
//!
//! Years, months, weeks and days move the wall clock (month ends clamp,
//! zoned values are re-resolved with the "compatible" rule). Hours and
//! smaller are exact and are applied on the timeline afterwards, so adding
//! `{ days: 1 }` across a DST change keeps the wall-clock time while adding
//! `{ hours: 24 }` does not.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use chrono_tz::Tz;

use crate::error::{Result, TemporalError};
use crate::timezone::resolve_local;
use crate::types::{DateLike, DateValue, DurationFields};

const NANOS_PER_DAY: i128 = 86_400_000_000_000;

/// The calendar unit used by [`start_of`] and [`end_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Year,
    Month,
    Week,
    Day,
}

/// Week configuration for [`start_of_with`] / [`end_of_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekOptions {
    /// First day of the week. ISO 8601 (and the default) is Monday.
    pub week_starts_on: Weekday,
}

impl Default for WeekOptions {
    fn default() -> Self {
        WeekOptions {
            week_starts_on: Weekday::Mon,
        }
    }
}

// ── add / subtract ──────────────────────────────────────────────────────────

/// Add a duration to a date-like value.
///
/// ```
/// use chrono::NaiveDate;
/// use temporal_kit::math::add;
/// use temporal_kit::DurationFields;
///
/// let date = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
/// let later = add(&date, &DurationFields { months: 2, days: 3, ..Default::default() }).unwrap();
/// assert_eq!(later, NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
/// ```
///
/// # Errors
///
/// Returns [`TemporalError::OutOfRange`] when the result leaves chrono's
/// representable range.
pub fn add<T: DateValue>(value: &T, duration: &DurationFields) -> Result<T> {
    value.add_fields(duration)
}

/// Subtract a duration from a date-like value.
///
/// # Errors
///
/// Same as [`add`], and [`TemporalError::OutOfRange`] for a field of
/// `i64::MIN`, which has no positive counterpart.
pub fn subtract<T: DateValue>(value: &T, duration: &DurationFields) -> Result<T> {
    value.add_fields(&duration.negated()?)
}

pub(crate) fn add_to_date(date: NaiveDate, duration: &DurationFields) -> Result<NaiveDate> {
    // Sub-day fields balance into whole days, truncating toward zero.
    let extra_days = i64::try_from(duration.exact_nanos() / NANOS_PER_DAY)
        .map_err(|_| overflow("duration"))?;
    let date = add_calendar(date, duration, extra_days)?;
    Ok(date)
}

pub(crate) fn add_to_date_time(
    dt: NaiveDateTime,
    duration: &DurationFields,
) -> Result<NaiveDateTime> {
    let date = add_calendar(dt.date(), duration, 0)?;
    let moved = date.and_time(dt.time());
    moved
        .checked_add_signed(exact_delta(duration)?)
        .ok_or_else(|| overflow(moved))
}

pub(crate) fn add_to_zoned(zdt: DateTime<Tz>, duration: &DurationFields) -> Result<DateTime<Tz>> {
    let tz = zdt.timezone();
    let has_calendar_part = duration.total_months() != Some(0) || duration.total_days() != Some(0);
    let base = if has_calendar_part {
        let date = add_calendar(zdt.date_naive(), duration, 0)?;
        resolve_local(&date.and_time(zdt.time()), tz)?
    } else {
        zdt
    };
    base.checked_add_signed(exact_delta(duration)?)
        .ok_or_else(|| overflow(base))
}

fn add_calendar(date: NaiveDate, duration: &DurationFields, extra_days: i64) -> Result<NaiveDate> {
    let months = duration.total_months().ok_or_else(|| overflow("months"))?;
    let days = duration
        .total_days()
        .and_then(|d| d.checked_add(extra_days))
        .ok_or_else(|| overflow("days"))?;

    let months_u32 = u32::try_from(months.unsigned_abs()).map_err(|_| overflow("months"))?;
    let date = if months >= 0 {
        date.checked_add_months(Months::new(months_u32))
    } else {
        date.checked_sub_months(Months::new(months_u32))
    }
    .ok_or_else(|| overflow(date))?;

    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
    .ok_or_else(|| overflow(date))
}

fn exact_delta(duration: &DurationFields) -> Result<TimeDelta> {
    let nanos = duration.exact_nanos();
    let secs = i64::try_from(nanos.div_euclid(1_000_000_000)).map_err(|_| overflow("seconds"))?;
    let subsec = nanos.rem_euclid(1_000_000_000) as u32;
    TimeDelta::new(secs, subsec).ok_or_else(|| overflow("seconds"))
}

fn overflow(what: impl std::fmt::Display) -> TemporalError {
    TemporalError::OutOfRange(format!("arithmetic on {what} overflowed"))
}

// ── start_of / end_of ───────────────────────────────────────────────────────

/// Start of the unit containing `value`; weeks start on Monday.
///
/// Plain dates stay plain dates; values with a time land on 00:00.
pub fn start_of<T: DateValue>(value: &T, unit: DateUnit) -> Result<T> {
    start_of_with(value, unit, &WeekOptions::default())
}

/// End of the unit containing `value`; weeks end on Sunday.
///
/// Values with a time land on 23:59:59.999999999.
pub fn end_of<T: DateValue>(value: &T, unit: DateUnit) -> Result<T> {
    end_of_with(value, unit, &WeekOptions::default())
}

/// [`start_of`] with a configurable first day of the week.
pub fn start_of_with<T: DateValue>(value: &T, unit: DateUnit, options: &WeekOptions) -> Result<T> {
    let like = value.to_date_like();
    let date = like.date();
    let first = match unit {
        DateUnit::Day => date,
        DateUnit::Week => {
            let back = days_since_week_start(date.weekday(), options.week_starts_on);
            date.checked_sub_days(Days::new(back))
                .ok_or_else(|| overflow(date))?
        }
        DateUnit::Month => date.with_day(1).ok_or_else(|| overflow(date))?,
        DateUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).ok_or_else(|| overflow(date))?,
    };
    rebuild(like, first, NaiveTime::MIN)
}

/// [`end_of`] with a configurable first day of the week.
pub fn end_of_with<T: DateValue>(value: &T, unit: DateUnit, options: &WeekOptions) -> Result<T> {
    let like = value.to_date_like();
    let date = like.date();
    let last = match unit {
        DateUnit::Day => date,
        DateUnit::Week => {
            let forward = 6 - days_since_week_start(date.weekday(), options.week_starts_on);
            date.checked_add_days(Days::new(forward))
                .ok_or_else(|| overflow(date))?
        }
        DateUnit::Month => last_day_of_month(date)?,
        DateUnit::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31).ok_or_else(|| overflow(date))?,
    };
    rebuild(like, last, last_instant_of_day())
}

fn days_since_week_start(weekday: Weekday, week_start: Weekday) -> u64 {
    let offset = weekday.num_days_from_monday() as i64 - week_start.num_days_from_monday() as i64;
    offset.rem_euclid(7) as u64
}

fn last_day_of_month(date: NaiveDate) -> Result<NaiveDate> {
    let first = date.with_day(1).ok_or_else(|| overflow(date))?;
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| overflow(date))
}

fn last_instant_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

fn rebuild<T: DateValue>(like: DateLike, date: NaiveDate, time: NaiveTime) -> Result<T> {
    let rebuilt = match like {
        DateLike::Date(_) => DateLike::Date(date),
        DateLike::DateTime(_) => DateLike::DateTime(date.and_time(time)),
        DateLike::Zoned(z) => DateLike::Zoned(resolve_local(&date.and_time(time), z.timezone())?),
    };
    T::from_date_like(rebuilt)
        .ok_or_else(|| TemporalError::OutOfRange(format!("cannot rebuild {rebuilt:?}")))
}

// ── Tests ───────────────────────────────────────────────────────────────────

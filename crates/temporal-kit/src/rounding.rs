//! Rounding times, date-times, zoned values and instants to a unit.
//!
//! Rounding works on the nanoseconds elapsed since the start of the day (or
//! since the Unix epoch for instants) and snaps them to a multiple of
//! `increment × unit`. Zoned values round their wall clock and keep their
//! offset where it is still valid; rounding a zoned value to a whole day uses
//! the real length of that day, so a 23-hour DST day has its midpoint at
//! 11:30 elapsed.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Offset, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{Result, TemporalError};
use crate::timezone::{resolve_local, resolve_with_offset};

const NANOS_PER_DAY: i128 = 86_400_000_000_000;

// ── Options ─────────────────────────────────────────────────────────────────

/// How to pick between the two candidate multiples around a value.
///
/// `Ceil`/`Floor` go toward positive/negative infinity, `Expand`/`Trunc`
/// away from/toward zero. The `Half*` modes pick the nearer candidate and
/// use the named rule only on an exact tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundingMode {
    Ceil,
    Floor,
    Expand,
    Trunc,
    HalfCeil,
    HalfFloor,
    #[default]
    HalfExpand,
    HalfTrunc,
    HalfEven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingUnit {
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl RoundingUnit {
    fn nanos(self) -> i128 {
        match self {
            RoundingUnit::Day => NANOS_PER_DAY,
            RoundingUnit::Hour => 3_600_000_000_000,
            RoundingUnit::Minute => 60_000_000_000,
            RoundingUnit::Second => 1_000_000_000,
            RoundingUnit::Millisecond => 1_000_000,
            RoundingUnit::Microsecond => 1_000,
            RoundingUnit::Nanosecond => 1,
        }
    }

    /// How many of this unit make up the next larger one.
    fn per_next_unit(self) -> u32 {
        match self {
            RoundingUnit::Day => 1,
            RoundingUnit::Hour => 24,
            RoundingUnit::Minute | RoundingUnit::Second => 60,
            RoundingUnit::Millisecond | RoundingUnit::Microsecond | RoundingUnit::Nanosecond => 1000,
        }
    }
}

/// Options for [`round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundingOptions {
    pub mode: RoundingMode,
    /// Round to multiples of this many units (e.g. 15 with
    /// [`RoundingUnit::Minute`]). Must divide the next larger unit evenly.
    pub increment: u32,
}

impl Default for RoundingOptions {
    fn default() -> Self {
        RoundingOptions {
            mode: RoundingMode::HalfExpand,
            increment: 1,
        }
    }
}

impl RoundingOptions {
    pub fn with_mode(mode: RoundingMode) -> Self {
        RoundingOptions {
            mode,
            ..Default::default()
        }
    }

    fn increment_nanos(&self, unit: RoundingUnit) -> Result<i128> {
        let limit = unit.per_next_unit();
        let divides = self.increment > 0 && limit % self.increment == 0;
        if !divides || (self.increment == limit && limit > 1) {
            return Err(TemporalError::InvalidRounding(format!(
                "increment {} does not evenly divide {limit} ({unit:?})",
                self.increment
            )));
        }
        Ok(unit.nanos() * i128::from(self.increment))
    }

    /// Increment check for instants: `increment × unit` must divide a solar
    /// day, and a day itself is not a unit an instant can round to.
    fn instant_increment_nanos(&self, unit: RoundingUnit) -> Result<i128> {
        if unit == RoundingUnit::Day {
            return Err(TemporalError::InvalidRounding(
                "an instant cannot be rounded to Day".to_string(),
            ));
        }
        let increment = unit.nanos() * i128::from(self.increment);
        if increment == 0 || NANOS_PER_DAY % increment != 0 {
            return Err(TemporalError::InvalidRounding(format!(
                "increment {} {unit:?} does not evenly divide a day",
                self.increment
            )));
        }
        Ok(increment)
    }
}

// ── Entry points ────────────────────────────────────────────────────────────

/// Types that can be rounded to a [`RoundingUnit`].
pub trait Roundable: Sized {
    fn round_to(&self, unit: RoundingUnit, options: &RoundingOptions) -> Result<Self>;
}

/// Round `value` to `unit` using `options`.
///
/// # Errors
///
/// [`TemporalError::InvalidRounding`] for an increment that does not divide
/// the next larger unit, or [`RoundingUnit::Day`] on a time of day. Instants
/// instead need `increment × unit` to divide a day and reject
/// [`RoundingUnit::Day`].
/// [`TemporalError::OutOfRange`] if the rounded value is not representable.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use temporal_kit::rounding::{round, RoundingOptions, RoundingUnit};
///
/// let t = NaiveTime::from_hms_opt(14, 38, 0).unwrap();
/// let quarter = RoundingOptions { increment: 15, ..Default::default() };
/// assert_eq!(
///     round(&t, RoundingUnit::Minute, &quarter).unwrap(),
///     NaiveTime::from_hms_opt(14, 45, 0).unwrap()
/// );
/// ```
pub fn round<T: Roundable>(value: &T, unit: RoundingUnit, options: &RoundingOptions) -> Result<T> {
    value.round_to(unit, options)
}

/// Round down to a whole `unit`.
pub fn floor<T: Roundable>(value: &T, unit: RoundingUnit) -> Result<T> {
    value.round_to(unit, &RoundingOptions::with_mode(RoundingMode::Floor))
}

/// Round up to a whole `unit`.
pub fn ceil<T: Roundable>(value: &T, unit: RoundingUnit) -> Result<T> {
    value.round_to(unit, &RoundingOptions::with_mode(RoundingMode::Ceil))
}

// ── Implementations ─────────────────────────────────────────────────────────

impl Roundable for NaiveTime {
    /// Wraps past midnight: ceiling 23:30 to the hour gives 00:00.
    fn round_to(&self, unit: RoundingUnit, options: &RoundingOptions) -> Result<Self> {
        if unit == RoundingUnit::Day {
            return Err(TemporalError::InvalidRounding(
                "a time of day cannot be rounded to days".to_string(),
            ));
        }
        let increment = options.increment_nanos(unit)?;
        let rounded = round_increment(nanos_of_day(self), increment, options.mode);
        time_from_nanos(rounded.rem_euclid(NANOS_PER_DAY))
    }
}

impl Roundable for NaiveDateTime {
    /// Carries into the next day when the time rounds up to 24:00.
    fn round_to(&self, unit: RoundingUnit, options: &RoundingOptions) -> Result<Self> {
        let increment = options.increment_nanos(unit)?;
        let rounded = round_increment(nanos_of_day(&self.time()), increment, options.mode);
        let midnight = self.date().and_time(NaiveTime::MIN);
        add_nanos(midnight, rounded)
    }
}

impl Roundable for DateTime<Tz> {
    fn round_to(&self, unit: RoundingUnit, options: &RoundingOptions) -> Result<Self> {
        let tz = self.timezone();

        if unit == RoundingUnit::Day {
            options.increment_nanos(unit)?;
            let date = self.date_naive();
            let start = resolve_local(&date.and_time(NaiveTime::MIN), tz)?;
            let next_date = date.succ_opt().ok_or_else(|| out_of_range(&date))?;
            let next = resolve_local(&next_date.and_time(NaiveTime::MIN), tz)?;
            let day_length = span_nanos(&start, &next);
            let elapsed = span_nanos(&start, self);
            let rounded = round_increment(elapsed, day_length, options.mode);
            return Ok(if rounded == 0 { start } else { next });
        }

        let wall = self.naive_local().round_to(unit, options)?;
        match resolve_with_offset(&wall, tz, self.offset().fix()) {
            Some(same_offset) => Ok(same_offset),
            None => resolve_local(&wall, tz),
        }
    }
}

impl Roundable for DateTime<Utc> {
    fn round_to(&self, unit: RoundingUnit, options: &RoundingOptions) -> Result<Self> {
        let increment = options.instant_increment_nanos(unit)?;
        let epoch = i128::from(self.timestamp()) * 1_000_000_000 + i128::from(self.timestamp_subsec_nanos());
        let rounded = round_increment(epoch, increment, options.mode);
        let secs = i64::try_from(rounded.div_euclid(1_000_000_000)).map_err(|_| out_of_range(self))?;
        let nanos = rounded.rem_euclid(1_000_000_000) as u32;
        DateTime::from_timestamp(secs, nanos).ok_or_else(|| out_of_range(self))
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Snap `value` to a multiple of `increment` (> 0) according to `mode`.
fn round_increment(value: i128, increment: i128, mode: RoundingMode) -> i128 {
    let quotient = value.div_euclid(increment);
    let remainder = value.rem_euclid(increment);
    if remainder == 0 {
        return value;
    }
    let lower = quotient * increment;
    let upper = lower + increment;
    let negative = value < 0;

    let up = match mode {
        RoundingMode::Ceil => true,
        RoundingMode::Floor => false,
        RoundingMode::Expand => !negative,
        RoundingMode::Trunc => negative,
        half => match (remainder * 2).cmp(&increment) {
            Ordering::Less => false,
            Ordering::Greater => true,
            Ordering::Equal => match half {
                RoundingMode::HalfCeil => true,
                RoundingMode::HalfFloor => false,
                RoundingMode::HalfTrunc => negative,
                RoundingMode::HalfEven => quotient.rem_euclid(2) == 1,
                _ => !negative,
            },
        },
    };
    if up { upper } else { lower }
}

fn nanos_of_day(time: &NaiveTime) -> i128 {
    // chrono encodes a leap second as nanosecond >= 1e9; fold it into :59.
    let nanos = time.nanosecond().min(999_999_999);
    i128::from(time.num_seconds_from_midnight()) * 1_000_000_000 + i128::from(nanos)
}

fn time_from_nanos(nanos: i128) -> Result<NaiveTime> {
    let secs = u32::try_from(nanos / 1_000_000_000).map_err(|_| out_of_range(&nanos))?;
    let sub = (nanos % 1_000_000_000) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, sub).ok_or_else(|| out_of_range(&nanos))
}

fn add_nanos(base: NaiveDateTime, nanos: i128) -> Result<NaiveDateTime> {
    let nanos = i64::try_from(nanos).map_err(|_| out_of_range(&base))?;
    base.checked_add_signed(TimeDelta::nanoseconds(nanos))
        .ok_or_else(|| out_of_range(&base))
}

fn span_nanos(from: &DateTime<Tz>, to: &DateTime<Tz>) -> i128 {
    let delta = to.signed_duration_since(from);
    i128::from(delta.num_seconds()) * 1_000_000_000 + i128::from(delta.subsec_nanos())
}

fn out_of_range(value: &dyn std::fmt::Display) -> TemporalError {
    TemporalError::OutOfRange(format!("rounding {value} left the supported range"))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn time_ms(h: u32, m: u32, s: u32, ms: u32) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(h, m, s, ms).unwrap()
    }

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
    }

    fn quarter_hour() -> RoundingOptions {
        RoundingOptions {
            increment: 15,
            ..Default::default()
        }
    }

    // ── Modes ───────────────────────────────────────────────────────────

    #[test]
    fn test_round_increment_modes_positive() {
        // 23 lies between 20 and 30, below the midpoint.
        assert_eq!(round_increment(23, 10, RoundingMode::Ceil), 30);
        assert_eq!(round_increment(23, 10, RoundingMode::Floor), 20);
        assert_eq!(round_increment(23, 10, RoundingMode::Expand), 30);
        assert_eq!(round_increment(23, 10, RoundingMode::Trunc), 20);
        assert_eq!(round_increment(23, 10, RoundingMode::HalfExpand), 20);
        assert_eq!(round_increment(27, 10, RoundingMode::HalfFloor), 30);
    }

    #[test]
    fn test_round_increment_ties() {
        assert_eq!(round_increment(25, 10, RoundingMode::HalfCeil), 30);
        assert_eq!(round_increment(25, 10, RoundingMode::HalfFloor), 20);
        assert_eq!(round_increment(25, 10, RoundingMode::HalfExpand), 30);
        assert_eq!(round_increment(25, 10, RoundingMode::HalfTrunc), 20);
        assert_eq!(round_increment(25, 10, RoundingMode::HalfEven), 20);
        assert_eq!(round_increment(35, 10, RoundingMode::HalfEven), 40);
    }

    #[test]
    fn test_round_increment_negative() {
        assert_eq!(round_increment(-23, 10, RoundingMode::Ceil), -20);
        assert_eq!(round_increment(-23, 10, RoundingMode::Floor), -30);
        assert_eq!(round_increment(-23, 10, RoundingMode::Expand), -30);
        assert_eq!(round_increment(-23, 10, RoundingMode::Trunc), -20);
        assert_eq!(round_increment(-25, 10, RoundingMode::HalfExpand), -30);
        assert_eq!(round_increment(-25, 10, RoundingMode::HalfTrunc), -20);
    }

    #[test]
    fn test_round_increment_exact_multiple_unchanged() {
        assert_eq!(round_increment(40, 10, RoundingMode::Ceil), 40);
    }

    // ── NaiveTime ───────────────────────────────────────────────────────

    #[test]
    fn test_round_time_to_quarter_hour() {
        let opts = quarter_hour();
        assert_eq!(round(&time(14, 37, 0), RoundingUnit::Minute, &opts).unwrap(), time(14, 30, 0));
        assert_eq!(round(&time(14, 38, 0), RoundingUnit::Minute, &opts).unwrap(), time(14, 45, 0));
    }

    #[test]
    fn test_floor_and_ceil_time() {
        assert_eq!(floor(&time(14, 59, 59), RoundingUnit::Hour).unwrap(), time(14, 0, 0));
        assert_eq!(ceil(&time(14, 0, 1), RoundingUnit::Hour).unwrap(), time(15, 0, 0));
    }

    #[test]
    fn test_ceil_time_wraps_midnight() {
        assert_eq!(ceil(&time(23, 30, 0), RoundingUnit::Hour).unwrap(), time(0, 0, 0));
    }

    #[test]
    fn test_round_time_half_even_seconds() {
        let opts = RoundingOptions::with_mode(RoundingMode::HalfEven);
        assert_eq!(
            round(&time_ms(12, 0, 0, 500), RoundingUnit::Second, &opts).unwrap(),
            time(12, 0, 0)
        );
        assert_eq!(
            round(&time_ms(12, 0, 1, 500), RoundingUnit::Second, &opts).unwrap(),
            time(12, 0, 2)
        );
    }

    #[test]
    fn test_round_time_milliseconds() {
        let t = NaiveTime::from_hms_micro_opt(10, 0, 0, 123_456).unwrap();
        assert_eq!(
            round(&t, RoundingUnit::Millisecond, &RoundingOptions::default()).unwrap(),
            time_ms(10, 0, 0, 123)
        );
    }

    #[test]
    fn test_round_time_to_day_is_error() {
        let err = round(&time(12, 0, 0), RoundingUnit::Day, &RoundingOptions::default()).unwrap_err();
        assert!(matches!(err, TemporalError::InvalidRounding(_)));
    }

    #[test]
    fn test_invalid_increment() {
        let seven = RoundingOptions {
            increment: 7,
            ..Default::default()
        };
        assert!(round(&time(12, 0, 0), RoundingUnit::Minute, &seven).is_err());

        let zero = RoundingOptions {
            increment: 0,
            ..Default::default()
        };
        assert!(round(&time(12, 0, 0), RoundingUnit::Minute, &zero).is_err());

        let whole_hour = RoundingOptions {
            increment: 60,
            ..Default::default()
        };
        assert!(round(&time(12, 0, 0), RoundingUnit::Minute, &whole_hour).is_err());
    }

    #[test]
    fn test_hour_increments() {
        let six = RoundingOptions {
            increment: 6,
            mode: RoundingMode::Floor,
        };
        assert_eq!(round(&time(17, 0, 0), RoundingUnit::Hour, &six).unwrap(), time(12, 0, 0));
    }

    // ── NaiveDateTime ───────────────────────────────────────────────────

    #[test]
    fn test_ceil_date_time_carries_into_next_day() {
        assert_eq!(ceil(&dt(2025, 12, 31, 23, 30), RoundingUnit::Hour).unwrap(), dt(2026, 1, 1, 0, 0));
    }

    #[test]
    fn test_round_date_time_to_day() {
        let opts = RoundingOptions::default();
        assert_eq!(round(&dt(2025, 6, 1, 11, 59), RoundingUnit::Day, &opts).unwrap(), dt(2025, 6, 1, 0, 0));
        assert_eq!(round(&dt(2025, 6, 1, 12, 0), RoundingUnit::Day, &opts).unwrap(), dt(2025, 6, 2, 0, 0));
    }

    // ── Zoned ───────────────────────────────────────────────────────────

    #[test]
    fn test_round_zoned_day_uses_real_day_length() {
        // 2025-03-09 in New York is 23 hours long.
        let tz = chrono_tz::America::New_York;
        let opts = RoundingOptions::default();
        let noon = tz.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
        let rounded = round(&noon, RoundingUnit::Day, &opts).unwrap();
        assert_eq!(rounded.naive_local(), dt(2025, 3, 9, 0, 0));

        let half_past = tz.with_ymd_and_hms(2025, 3, 9, 12, 30, 0).unwrap();
        let rounded = round(&half_past, RoundingUnit::Day, &opts).unwrap();
        assert_eq!(rounded.naive_local(), dt(2025, 3, 10, 0, 0));
    }

    #[test]
    fn test_round_zoned_keeps_offset_in_repeated_hour() {
        // 01:40 EST on 2025-11-02 (the second 01:xx) floors to 01:00 EST, not EDT.
        let tz = chrono_tz::America::New_York;
        let est = tz
            .from_local_datetime(&dt(2025, 11, 2, 1, 40))
            .latest()
            .unwrap();
        let floored = floor(&est, RoundingUnit::Hour).unwrap();
        assert_eq!(floored.naive_local(), dt(2025, 11, 2, 1, 0));
        assert_eq!(floored.offset().fix().local_minus_utc(), -5 * 3600);
    }

    // ── Instant ─────────────────────────────────────────────────────────

    #[test]
    fn test_round_instant() {
        let i = Utc.with_ymd_and_hms(2025, 6, 1, 10, 29, 31).unwrap();
        let rounded = round(&i, RoundingUnit::Minute, &RoundingOptions::default()).unwrap();
        assert_eq!(rounded, Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_round_instant_increments_divide_a_day() {
        let i = Utc.with_ymd_and_hms(2025, 6, 1, 10, 50, 0).unwrap();
        let ninety = RoundingOptions {
            increment: 90,
            ..Default::default()
        };
        let rounded = round(&i, RoundingUnit::Minute, &ninety).unwrap();
        assert_eq!(rounded, Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap());

        let twelve_hours = RoundingOptions {
            increment: 12,
            ..Default::default()
        };
        let rounded = round(&i, RoundingUnit::Hour, &twelve_hours).unwrap();
        assert_eq!(rounded, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());

        let seven = RoundingOptions {
            increment: 7,
            ..Default::default()
        };
        assert!(matches!(
            round(&i, RoundingUnit::Minute, &seven),
            Err(TemporalError::InvalidRounding(_))
        ));
    }

    #[test]
    fn test_round_instant_to_day_is_error() {
        let i = Utc.with_ymd_and_hms(2025, 6, 1, 10, 50, 0).unwrap();
        assert!(matches!(
            round(&i, RoundingUnit::Day, &RoundingOptions::default()),
            Err(TemporalError::InvalidRounding(_))
        ));
    }

    #[test]
    fn test_floor_instant_before_epoch() {
        let i = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 30).unwrap();
        let floored = floor(&i, RoundingUnit::Minute).unwrap();
        assert_eq!(floored, Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 0).unwrap());
    }
}

//! Intervals of date-like values: overlap, containment and stepping.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::compare::compare_values;
use crate::error::Result;
use crate::types::{DateValue, DurationFields};

// ── Interval ────────────────────────────────────────────────────────────────

/// A start and an end, both inclusive. The bounds are never swapped; an
/// interval whose start is after its end is empty for stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

impl<T: DateValue> Interval<T> {
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// Whether `start <= value <= end`.
    pub fn contains<V: DateValue>(&self, value: &V) -> Result<bool> {
        Ok(compare_values(value, &self.start)?.is_ge() && compare_values(value, &self.end)?.is_le())
    }
}

/// Whether two intervals share more than a boundary point.
///
/// Intervals that only touch (`a.end == b.start`) do not overlap.
///
/// ```
/// use chrono::NaiveDate;
/// use temporal_kit::range::{ranges_overlap, Interval};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
/// assert!(ranges_overlap(&Interval::new(d(1), d(10)), &Interval::new(d(5), d(15))).unwrap());
/// assert!(!ranges_overlap(&Interval::new(d(1), d(10)), &Interval::new(d(10), d(20))).unwrap());
/// ```
pub fn ranges_overlap<T: DateValue>(a: &Interval<T>, b: &Interval<T>) -> Result<bool> {
    Ok(compare_values(&a.start, &b.end)?.is_lt() && compare_values(&a.end, &b.start)?.is_gt())
}

// ── Stepping ────────────────────────────────────────────────────────────────

/// Iterator over `start, start + step, start + 2·step, ...` up to and
/// including `end`. Created by [`step_interval`].
///
/// A step that never advances past `end` (zero, or pointing backwards)
/// produces an endless sequence. Arithmetic overflow ends the sequence.
#[derive(Debug, Clone)]
pub struct StepInterval<T> {
    next: Option<T>,
    end: T,
    step: DurationFields,
}

impl<T: DateValue> Iterator for StepInterval<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next.take()?;
        // Bounds were checked for comparability when the iterator was built.
        if !matches!(compare_values(&current, &self.end), Ok(Ordering::Less | Ordering::Equal)) {
            return None;
        }
        match current.add_fields(&self.step) {
            Ok(next) => self.next = Some(next),
            Err(e) => trace!("interval stepping stopped: {e}"),
        }
        Some(current)
    }
}

impl<T: DateValue> FusedIterator for StepInterval<T> {}

/// Step through `interval` by `step`.
///
/// # Errors
///
/// Fails when the bounds cannot be compared with each other (a zoned value
/// against an unzoned date-time).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use temporal_kit::range::{step_interval, Interval};
/// use temporal_kit::DurationFields;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
/// let days: Vec<_> = step_interval(&Interval::new(d(1), d(5)), DurationFields::of_days(2))
///     .unwrap()
///     .collect();
/// assert_eq!(days, vec![d(1), d(3), d(5)]);
/// ```
pub fn step_interval<T: DateValue>(interval: &Interval<T>, step: DurationFields) -> Result<StepInterval<T>> {
    compare_values(&interval.start, &interval.end)?;
    if step.is_zero() {
        trace!("zero step: interval iteration will not terminate on its own");
    }
    Ok(StepInterval {
        next: Some(interval.start.clone()),
        end: interval.end.clone(),
        step,
    })
}

/// Every day from `start` to `end`, inclusive.
pub fn each_day_of_interval<T: DateValue>(interval: &Interval<T>) -> Result<Vec<T>> {
    Ok(step_interval(interval, DurationFields::of_days(1))?.collect())
}

/// `start` and every 7 days after it, up to `end`.
pub fn each_week_of_interval<T: DateValue>(interval: &Interval<T>) -> Result<Vec<T>> {
    Ok(step_interval(interval, DurationFields::of_weeks(1))?.collect())
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemporalError;
    use crate::types::DateLike;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike};
    use chrono_tz::Tz;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn jan(day: u32) -> NaiveDate {
        date(2025, 1, day)
    }

    // ── ranges_overlap ──────────────────────────────────────────────────

    #[test]
    fn test_overlapping_ranges() {
        let a = Interval::new(jan(1), jan(10));
        let b = Interval::new(jan(5), jan(15));
        assert!(ranges_overlap(&a, &b).unwrap());
        assert!(ranges_overlap(&b, &a).unwrap());
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        let a = Interval::new(jan(1), jan(10));
        let b = Interval::new(jan(10), jan(20));
        assert!(!ranges_overlap(&a, &b).unwrap());
        assert!(!ranges_overlap(&b, &a).unwrap());
    }

    #[test]
    fn test_disjoint_ranges() {
        let a = Interval::new(jan(1), jan(3));
        let b = Interval::new(jan(5), jan(7));
        assert!(!ranges_overlap(&a, &b).unwrap());
    }

    #[test]
    fn test_contained_range_overlaps() {
        let outer = Interval::new(jan(1), jan(31));
        let inner = Interval::new(jan(10), jan(12));
        assert!(ranges_overlap(&outer, &inner).unwrap());
    }

    #[test]
    fn test_overlap_date_times() {
        let a = Interval::new(dt(2025, 1, 1, 9), dt(2025, 1, 1, 12));
        let b = Interval::new(dt(2025, 1, 1, 11), dt(2025, 1, 1, 13));
        assert!(ranges_overlap(&a, &b).unwrap());
    }

    #[test]
    fn test_overlap_mixed_zone_is_error() {
        let z: DateTime<Tz> = chrono_tz::UTC.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let a = Interval::new(DateLike::from(z), DateLike::from(z));
        let b = Interval::new(DateLike::from(dt(2025, 1, 1, 9)), DateLike::from(dt(2025, 1, 1, 11)));
        assert_eq!(ranges_overlap(&a, &b), Err(TemporalError::MixedZoneComparison));
    }

    // ── contains ────────────────────────────────────────────────────────

    #[test]
    fn test_contains_is_inclusive() {
        let r = Interval::new(jan(1), jan(10));
        assert!(r.contains(&jan(1)).unwrap());
        assert!(r.contains(&jan(10)).unwrap());
        assert!(r.contains(&jan(5)).unwrap());
        assert!(!r.contains(&jan(11)).unwrap());
    }

    #[test]
    fn test_contains_other_kind() {
        let r = Interval::new(jan(1), jan(10));
        assert!(r.contains(&dt(2025, 1, 10, 23)).unwrap());
    }

    // ── step_interval ───────────────────────────────────────────────────

    #[test]
    fn test_step_two_days() {
        let steps: Vec<_> = step_interval(&Interval::new(jan(1), jan(5)), DurationFields::of_days(2))
            .unwrap()
            .collect();
        assert_eq!(steps, vec![jan(1), jan(3), jan(5)]);
    }

    #[test]
    fn test_step_stops_before_passing_end() {
        let steps: Vec<_> = step_interval(&Interval::new(jan(1), jan(6)), DurationFields::of_days(2))
            .unwrap()
            .collect();
        assert_eq!(steps, vec![jan(1), jan(3), jan(5)]);
    }

    #[test]
    fn test_step_reversed_interval_is_empty() {
        let mut steps = step_interval(&Interval::new(jan(5), jan(1)), DurationFields::of_days(1)).unwrap();
        assert_eq!(steps.next(), None);
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_step_hours_over_date_times() {
        let steps: Vec<_> = step_interval(
            &Interval::new(dt(2025, 1, 1, 22), dt(2025, 1, 2, 2)),
            DurationFields::of_hours(2),
        )
        .unwrap()
        .collect();
        let hours: Vec<u32> = steps.iter().map(|d| d.hour()).collect();
        assert_eq!(hours, vec![22, 0, 2]);
    }

    #[test]
    fn test_step_months_clamps_to_month_end() {
        let steps: Vec<_> = step_interval(
            &Interval::new(jan(31), date(2025, 4, 30)),
            DurationFields::of_months(1),
        )
        .unwrap()
        .collect();
        assert_eq!(steps, vec![jan(31), date(2025, 2, 28), date(2025, 3, 28), date(2025, 4, 28)]);
    }

    #[test]
    fn test_zero_step_repeats_start() {
        let steps: Vec<_> = step_interval(&Interval::new(jan(1), jan(2)), DurationFields::default())
            .unwrap()
            .take(3)
            .collect();
        assert_eq!(steps, vec![jan(1); 3]);
    }

    #[test]
    fn test_step_ends_on_overflow() {
        let steps: Vec<_> = step_interval(&Interval::new(NaiveDate::MAX, NaiveDate::MAX), DurationFields::of_days(1))
            .unwrap()
            .collect();
        assert_eq!(steps, vec![NaiveDate::MAX]);
    }

    // ── each_day / each_week ────────────────────────────────────────────

    #[test]
    fn test_each_day_of_interval() {
        let days = each_day_of_interval(&Interval::new(jan(1), jan(3))).unwrap();
        assert_eq!(days, vec![jan(1), jan(2), jan(3)]);
    }

    #[test]
    fn test_each_day_single_day() {
        assert_eq!(each_day_of_interval(&Interval::new(jan(1), jan(1))).unwrap(), vec![jan(1)]);
    }

    #[test]
    fn test_each_week_of_interval() {
        let weeks = each_week_of_interval(&Interval::new(jan(1), jan(20))).unwrap();
        assert_eq!(weeks, vec![jan(1), jan(8), jan(15)]);
    }

    #[test]
    fn test_each_day_across_dst_keeps_wall_clock() {
        let tz = chrono_tz::America::New_York;
        let start = tz.with_ymd_and_hms(2025, 3, 8, 9, 0, 0).unwrap();
        let end = tz.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let days = each_day_of_interval(&Interval::new(start, end)).unwrap();
        assert_eq!(days.len(), 3);
        assert!(days.iter().all(|d| d.hour() == 9));
    }

    #[test]
    fn test_interval_serializes() {
        let r = Interval::new(jan(1), jan(3));
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"start":"2025-01-01","end":"2025-01-03"}"#);
        let back: Interval<NaiveDate> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}

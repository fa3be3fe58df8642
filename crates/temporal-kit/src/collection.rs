//! Min, max, closest match and sorting over slices of date-like values.
//!
//! Every function takes a borrowed slice and returns owned values of the
//! caller's type; the input is never reordered.

use std::cmp::Ordering;

use crate::compare::{compare, compare_values, epoch_nanos};
use crate::error::{Result, TemporalError};
use crate::types::{DateLike, DateValue};

// ── Extremes ────────────────────────────────────────────────────────────────

/// The earliest value. Ties keep the element that appears first.
///
/// # Errors
///
/// [`TemporalError::EmptyCollection`] for an empty slice, or
/// [`TemporalError::MixedZoneComparison`] when the values cannot be ordered.
pub fn min<T: DateValue>(values: &[T]) -> Result<T> {
    extreme(values, Ordering::Less, "minimum")
}

/// The latest value. Ties keep the element that appears first.
///
/// # Errors
///
/// Same as [`min`].
pub fn max<T: DateValue>(values: &[T]) -> Result<T> {
    extreme(values, Ordering::Greater, "maximum")
}

fn extreme<T: DateValue>(values: &[T], wanted: Ordering, what: &'static str) -> Result<T> {
    let (first, rest) = values
        .split_first()
        .ok_or(TemporalError::EmptyCollection(what))?;
    let mut best = first;
    for candidate in rest {
        if compare_values(candidate, best)? == wanted {
            best = candidate;
        }
    }
    Ok(best.clone())
}

// ── Closest match ───────────────────────────────────────────────────────────

/// The candidate nearest to `target` on the timeline, or `None` when there
/// are no candidates.
///
/// Distance is measured in nanoseconds with unzoned values read as UTC and
/// plain dates as midnight, so any mix of kinds is accepted. On equal
/// distance the earlier candidate in the slice wins.
pub fn closest_to<T: DateValue>(target: &T, candidates: &[T]) -> Option<T> {
    closest_index_to(target, candidates).map(|i| candidates[i].clone())
}

/// Index of the candidate [`closest_to`] would return.
pub fn closest_index_to<T: DateValue>(target: &T, candidates: &[T]) -> Option<usize> {
    let target = epoch_nanos(&target.to_date_like());
    let mut best: Option<(usize, u128)> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        let distance = epoch_nanos(&candidate.to_date_like()).abs_diff(target);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}

// ── Sorting ─────────────────────────────────────────────────────────────────

/// A sorted copy, earliest first. The sort is stable.
///
/// Plain dates mixed with values that carry a time sit at midnight of their
/// day, so the result is non-decreasing under [`compare`] for every kind mix
/// it accepts.
///
/// # Errors
///
/// [`TemporalError::MixedZoneComparison`] if the slice mixes zoned values
/// with unzoned date-times, or [`TemporalError::MixedZoneDates`] if plain
/// dates sit among zoned values from more than one zone. Nothing is sorted
/// in either case.
pub fn sort_asc<T: DateValue>(values: &[T]) -> Result<Vec<T>> {
    sorted_by(values, false)
}

/// A sorted copy, latest first. The sort is stable.
///
/// # Errors
///
/// Same as [`sort_asc`].
pub fn sort_desc<T: DateValue>(values: &[T]) -> Result<Vec<T>> {
    sorted_by(values, true)
}

fn sorted_by<T: DateValue>(values: &[T], descending: bool) -> Result<Vec<T>> {
    let likes: Vec<DateLike> = values.iter().map(DateValue::to_date_like).collect();
    ensure_comparable(&likes)?;

    let mut order: Vec<usize> = (0..likes.len()).collect();
    let mixes_dates = likes.iter().any(|v| !v.has_time()) && likes.iter().any(DateLike::has_time);
    if mixes_dates {
        // `compare` only sees the day when a plain date is involved, which is
        // not transitive; order by day first, then by position in the day.
        let key = |i: &usize| (likes[*i].date(), epoch_nanos(&likes[*i]));
        if descending {
            order.sort_by(|a, b| key(b).cmp(&key(a)));
        } else {
            order.sort_by_key(key);
        }
    } else {
        // Every pair is comparable once the kinds have been checked.
        order.sort_by(|&a, &b| {
            let (a, b) = if descending { (b, a) } else { (a, b) };
            compare(&likes[a], &likes[b]).unwrap_or(Ordering::Equal)
        });
    }
    Ok(order.into_iter().map(|i| values[i].clone()).collect())
}

/// Fails if `values` cannot be put in one order consistent with [`compare`].
pub(crate) fn ensure_comparable(values: &[DateLike]) -> Result<()> {
    let zoned = values.iter().find(|v| matches!(v, DateLike::Zoned(_)));
    let unzoned = values.iter().find(|v| matches!(v, DateLike::DateTime(_)));
    if let (Some(z), Some(d)) = (zoned, unzoned) {
        compare(z, d)?;
    }

    let has_dates = values.iter().any(|v| matches!(v, DateLike::Date(_)));
    let mut zones = values.iter().filter_map(DateLike::zone);
    if has_dates {
        if let Some(first) = zones.next() {
            if zones.any(|tz| tz != first) {
                return Err(TemporalError::MixedZoneDates);
            }
        }
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────

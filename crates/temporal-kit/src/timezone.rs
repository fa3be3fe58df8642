//! IANA timezone helpers.
//!
//! Zone lookups go through `chrono-tz`. Wall-clock times that are ambiguous
//! (DST fall-back) or skipped (DST spring-forward) are resolved with the
//! "compatible" rule: the earlier of two candidates, or the wall time shifted
//! forward by the length of the gap.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::error::{Result, TemporalError};

/// Parse an IANA timezone name into `Tz`.
///
/// # Errors
///
/// Returns [`TemporalError::InvalidTimezone`] for names unknown to the
/// timezone database.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| TemporalError::InvalidTimezone(format!("'{}'", s)))
}

/// Whether `s` names a zone in the timezone database. Never fails.
///
/// ```
/// use temporal_kit::timezone::is_valid_timezone;
///
/// assert!(is_valid_timezone("Europe/Berlin"));
/// assert!(!is_valid_timezone("Invalid/Timezone"));
/// ```
pub fn is_valid_timezone(s: &str) -> bool {
    parse_timezone(s).is_ok()
}

/// The database identifier for `s`, e.g. `"Europe/Berlin"` or `"UTC"`.
pub fn timezone_name(s: &str) -> Result<String> {
    parse_timezone(s).map(|tz| tz.name().to_string())
}

/// Attach `tz` to a wall-clock date-time using the "compatible" rule.
///
/// # Errors
///
/// Returns [`TemporalError::OutOfRange`] when shifting across a gap leaves
/// chrono's representable range.
pub fn resolve_local(naive: &NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        LocalResult::None => {
            // Reading the wall time with the offset in force before the gap
            // lands the same distance past the transition.
            let day_before = naive
                .checked_sub_signed(TimeDelta::days(1))
                .ok_or_else(|| out_of_range(naive))?;
            let before = tz.offset_from_utc_datetime(&day_before).fix();
            let utc = naive
                .checked_sub_signed(TimeDelta::seconds(i64::from(before.local_minus_utc())))
                .ok_or_else(|| out_of_range(naive))?;
            Ok(tz.from_utc_datetime(&utc))
        }
    }
}

/// Attach `tz` to a wall-clock date-time that must carry exactly `offset`.
///
/// Returns `None` when the offset is not one the zone uses at that wall time.
pub(crate) fn resolve_with_offset(
    naive: &NaiveDateTime,
    tz: Tz,
    offset: FixedOffset,
) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => (dt.offset().fix() == offset).then_some(dt),
        LocalResult::Ambiguous(a, b) => [a, b].into_iter().find(|dt| dt.offset().fix() == offset),
        LocalResult::None => None,
    }
}

fn out_of_range(naive: &NaiveDateTime) -> TemporalError {
    TemporalError::OutOfRange(format!("cannot place {naive} on the timeline"))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_valid_timezones() {
        assert!(is_valid_timezone("Europe/Berlin"));
        assert!(is_valid_timezone("America/New_York"));
        assert!(is_valid_timezone("UTC"));
    }

    #[test]
    fn test_invalid_timezones() {
        assert!(!is_valid_timezone("Invalid/Timezone"));
        assert!(!is_valid_timezone(""));
    }

    #[test]
    fn test_timezone_name() {
        assert_eq!(timezone_name("Europe/Berlin").unwrap(), "Europe/Berlin");
        assert_eq!(timezone_name("UTC").unwrap(), "UTC");
    }

    #[test]
    fn test_parse_timezone_error_message() {
        let err = parse_timezone("Mars/Olympus").unwrap_err().to_string();
        assert!(err.contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_resolve_local_unambiguous() {
        let tz: Tz = "Europe/Berlin".parse().unwrap();
        let dt = resolve_local(&naive(2025, 6, 1, 12, 0), tz).unwrap();
        assert_eq!(dt.offset().fix().local_minus_utc(), 7200);
    }

    #[test]
    fn test_resolve_local_fall_back_picks_earlier() {
        // November 2, 2025: New York 01:30 occurs twice (EDT then EST).
        let tz: Tz = "America/New_York".parse().unwrap();
        let dt = resolve_local(&naive(2025, 11, 2, 1, 30), tz).unwrap();
        assert_eq!(dt.offset().fix().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn test_resolve_local_spring_forward_shifts_past_gap() {
        // March 9, 2025: New York skips 02:00-03:00.
        let tz: Tz = "America/New_York".parse().unwrap();
        let dt = resolve_local(&naive(2025, 3, 9, 2, 30), tz).unwrap();
        assert_eq!(dt.naive_local(), naive(2025, 3, 9, 3, 30));
        assert_eq!(dt.offset().fix().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn test_resolve_with_offset_selects_matching_candidate() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let dt = resolve_with_offset(&naive(2025, 11, 2, 1, 30), tz, est).unwrap();
        assert_eq!(dt.offset().fix(), est);

        let wrong = FixedOffset::east_opt(3600).unwrap();
        assert!(resolve_with_offset(&naive(2025, 6, 1, 12, 0), tz, wrong).is_none());
    }
}

//! Format-detecting string parsing.
//!
//! [`parse`] turns free-form input into the most specific of the five value
//! kinds, trying recognizers in a fixed order:
//!
//! 1. Space-separated date + time (`"2025-11-30 15:30"`, `"30.11.2025 3:30 PM"`)
//! 2. ISO 8601, routed by shape: trailing `Z` or offset → instant, bracketed
//!    zone → zoned, `T` → plain date-time, `HH:MM[:SS]` → plain time,
//!    anything else without a space → plain date
//! 3. Common date formats: `DD.MM.YYYY`, `MM/DD/YYYY`, `DD-MM-YYYY`, `YYYY/MM/DD`
//! 4. Common time formats: `h[:MM[:SS]] AM/PM`, `H:MM`
//!
//! The ISO reader takes extended (`2025-11-30`) and basic (`20251130`)
//! dates, six-digit signed years (`+002025-11-30`), hour-only times
//! (`2025-11-30T15`) and offsets down to seconds (`+01:00:00`). Ordinal and
//! week dates (`2025-334`, `2025-W48-7`), `24:00`, fractional offsets and
//! calendars other than ISO 8601 are rejected.
//!
//! A common format that matches structurally but carries impossible field
//! values (`31.04.2025`, `13:00 PM`) is an error; it never falls through to
//! the next recognizer.
//!
//! [`parse_date`], [`parse_time`] and [`parse_date_time`] run the same
//! recognizer families restricted to a single result kind.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::debug;
use regex::{Captures, Regex};

use crate::error::{ParseTarget, Result, TemporalError};
use crate::timezone::{resolve_local, resolve_with_offset};
use crate::types::Temporal;

// ── Public entry points ─────────────────────────────────────────────────────

/// Parse a string into the most appropriate value kind.
///
/// ```
/// use temporal_kit::parse::parse;
/// use temporal_kit::Temporal;
///
/// assert!(matches!(parse("2025-11-30").unwrap(), Temporal::PlainDate(_)));
/// assert!(matches!(parse("2025-11-30T15:30:00").unwrap(), Temporal::PlainDateTime(_)));
/// assert!(matches!(parse("2025-11-30T15:30:00Z").unwrap(), Temporal::Instant(_)));
/// assert!(matches!(
///     parse("2025-11-30T15:30:00+01:00[Europe/Berlin]").unwrap(),
///     Temporal::Zoned(_)
/// ));
/// assert!(matches!(parse("3:30 PM").unwrap(), Temporal::PlainTime(_)));
/// assert!(matches!(parse("30.11.2025").unwrap(), Temporal::PlainDate(_)));
/// ```
///
/// # Errors
///
/// Returns [`TemporalError::Unparsable`] when no recognizer accepts the input
/// or a recognizer matched but the field values are out of range.
pub fn parse(input: &str) -> Result<Temporal> {
    let trimmed = input.trim();
    let fail = || TemporalError::unparsable(input, ParseTarget::Any);

    // Before ISO, so "2025-11-30 15:30" is not half-read as a date.
    if trimmed.contains(' ') {
        if let Some(dt) = parse_combined(trimmed) {
            debug!("parsed {trimmed:?} as date + time");
            return Ok(Temporal::PlainDateTime(dt));
        }
    }

    if let Some(value) = parse_iso_by_shape(trimmed) {
        debug!("parsed {trimmed:?} as ISO 8601");
        return Ok(value);
    }

    match recognize_date(trimmed) {
        Recognized::Valid(date) => return Ok(Temporal::PlainDate(date)),
        Recognized::Invalid => return Err(fail()),
        Recognized::NoMatch => {}
    }

    match recognize_time(trimmed) {
        Recognized::Valid(time) => Ok(Temporal::PlainTime(time)),
        Recognized::Invalid | Recognized::NoMatch => {
            debug!("no recognizer accepted {trimmed:?}");
            Err(fail())
        }
    }
}

/// Parse a string as a calendar date.
///
/// Accepts ISO `YYYY-MM-DD` plus `DD.MM.YYYY`, `MM/DD/YYYY`, `DD-MM-YYYY` and
/// `YYYY/MM/DD`. Never returns a time, even for input that looks like one.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Some(date) = iso_date(trimmed) {
        return Ok(date);
    }
    recognize_date(trimmed)
        .valid()
        .ok_or_else(|| TemporalError::unparsable(input, ParseTarget::Date))
}

/// Parse a string as a wall-clock time.
///
/// Accepts ISO `HH:MM[:SS[.fff]]`, `h[:MM[:SS]] AM/PM` and `H:MM`. An ISO
/// date-time yields its time; one with a `Z` designator is rejected.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();
    if let Some(time) = iso_time(trimmed).or_else(|| iso_date_time(trimmed).map(|dt| dt.time())) {
        return Ok(time);
    }
    recognize_time(trimmed)
        .valid()
        .ok_or_else(|| TemporalError::unparsable(input, ParseTarget::Time))
}

/// Parse a string as a plain date-time.
///
/// Accepts ISO `YYYY-MM-DDTHH:MM[:SS]` and any supported date followed by a
/// space and any supported time (`"30.11.2025 15:30"`, `"11/30/2025 3:30 PM"`).
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.contains('T') {
        if let Some(dt) = iso_date_time(trimmed) {
            return Ok(dt);
        }
    }
    parse_combined(trimmed).ok_or_else(|| TemporalError::unparsable(input, ParseTarget::DateTime))
}

/// Parse an ISO 8601 string with a bracketed IANA zone.
///
/// A numeric offset, when present, must be valid for that wall time in the
/// zone; `Z` places the exact instant in the zone.
pub fn parse_zoned(input: &str) -> Result<DateTime<Tz>> {
    iso_zoned(input.trim()).ok_or_else(|| TemporalError::unparsable(input, ParseTarget::Zoned))
}

/// Parse an ISO 8601 string with `Z` or a numeric offset into an instant.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    iso_instant(input.trim()).ok_or_else(|| TemporalError::unparsable(input, ParseTarget::Instant))
}

// ── Recognizer patterns ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
}

struct DateRecognizer {
    regex: Regex,
    order: FieldOrder,
}

struct Patterns {
    iso: Regex,
    iso_time: Regex,
    time_shape: Regex,
    dates: [DateRecognizer; 4],
    twelve_hour: Regex,
    twenty_four_hour: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(Patterns::new)
}

impl Patterns {
    fn new() -> Self {
        let re = |p: &str| Regex::new(p).expect("recognizer pattern compiles");
        Self {
            // Extended (YYYY-MM-DD) or basic (YYYYMMDD) date, optionally a
            // six-digit signed year; then [THH[:MM[:SS[.fffffffff]]][offset]],
            // [zone] and [u-ca=...]. `t` or a space may stand in for `T`.
            iso: re(concat!(
                r"^(?P<year>\d{4}|[+-]\d{6})",
                r"(?:-(?P<month>\d{2})-(?P<day>\d{2})|(?P<bmonth>\d{2})(?P<bday>\d{2}))",
                r"(?:[Tt ](?P<hour>\d{2})(?::?(?P<minute>\d{2})(?::?(?P<second>\d{2})(?:[.,](?P<fraction>\d{1,9}))?)?)?",
                r"(?P<offset>[Zz]|[+-]\d{2}(?::?\d{2}(?::?\d{2})?)?)?)?",
                r"(?:\[!?(?P<zone>[^\]\[=]+)\])?",
                r"(?:\[!?u-ca=(?P<calendar>[^\]]+)\])?$",
            )),
            iso_time: re(
                r"^(?P<hour>\d{2}):(?P<minute>\d{2})(?::(?P<second>\d{2})(?:[.,](?P<fraction>\d{1,9}))?)?$",
            ),
            time_shape: re(r"^\d{2}:\d{2}(:\d{2})?(\.\d+)?$"),
            dates: [
                DateRecognizer {
                    regex: re(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$"),
                    order: FieldOrder::DayMonthYear,
                },
                DateRecognizer {
                    regex: re(r"^(\d{1,2})/(\d{1,2})/(\d{4})$"),
                    order: FieldOrder::MonthDayYear,
                },
                DateRecognizer {
                    regex: re(r"^(\d{1,2})-(\d{1,2})-(\d{4})$"),
                    order: FieldOrder::DayMonthYear,
                },
                DateRecognizer {
                    regex: re(r"^(\d{4})/(\d{1,2})/(\d{1,2})$"),
                    order: FieldOrder::YearMonthDay,
                },
            ],
            twelve_hour: re(r"(?i)^(\d{1,2})(?::(\d{2})(?::(\d{2}))?)?\s*(AM|PM)$"),
            twenty_four_hour: re(r"^(\d{1,2}):(\d{2})$"),
        }
    }
}

/// Outcome of running one recognizer family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recognized<T> {
    /// No pattern in the family matched the shape of the input.
    NoMatch,
    /// A pattern matched but the fields do not form a valid value.
    Invalid,
    Valid(T),
}

impl<T> Recognized<T> {
    fn valid(self) -> Option<T> {
        match self {
            Recognized::Valid(v) => Some(v),
            Recognized::NoMatch | Recognized::Invalid => None,
        }
    }

    fn from_fields(value: Option<T>) -> Self {
        value.map_or(Recognized::Invalid, Recognized::Valid)
    }
}

// ── Common (locale) formats ─────────────────────────────────────────────────

fn recognize_date(s: &str) -> Recognized<NaiveDate> {
    for recognizer in &patterns().dates {
        if let Some(caps) = recognizer.regex.captures(s) {
            let (a, b, c) = (num(&caps, 1), num(&caps, 2), num(&caps, 3));
            let date = match recognizer.order {
                FieldOrder::DayMonthYear => ymd(c, b, a),
                FieldOrder::MonthDayYear => ymd(c, a, b),
                FieldOrder::YearMonthDay => ymd(a, b, c),
            };
            return Recognized::from_fields(date);
        }
    }
    Recognized::NoMatch
}

fn recognize_time(s: &str) -> Recognized<NaiveTime> {
    let p = patterns();

    if let Some(caps) = p.twelve_hour.captures(s) {
        let hour = num(&caps, 1);
        let minute = num(&caps, 2);
        let second = num(&caps, 3);
        let is_pm = caps
            .get(4)
            .is_some_and(|m| m.as_str().eq_ignore_ascii_case("pm"));
        let hour24 = hour.map(|h| match (h, is_pm) {
            (12, true) => 12,
            (12, false) => 0,
            (h, true) => h + 12,
            (h, false) => h,
        });
        let time = hour24.and_then(|h| {
            NaiveTime::from_hms_opt(h, minute.unwrap_or(0), second.unwrap_or(0))
        });
        return Recognized::from_fields(time);
    }

    if let Some(caps) = p.twenty_four_hour.captures(s) {
        let time = match (num(&caps, 1), num(&caps, 2)) {
            (Some(h), Some(m)) => NaiveTime::from_hms_opt(h, m, 0),
            _ => None,
        };
        return Recognized::from_fields(time);
    }

    Recognized::NoMatch
}

// ── Combined date + time ────────────────────────────────────────────────────

/// Split at the first whitespace run and parse both halves; both must succeed.
fn parse_combined(s: &str) -> Option<NaiveDateTime> {
    let split = s.find(char::is_whitespace)?;
    let (date_part, time_part) = (&s[..split], s[split..].trim_start());
    if date_part.is_empty() || time_part.is_empty() {
        return None;
    }

    let iso_d = iso_date(date_part);
    let iso_t = iso_time(time_part);
    let common_d = recognize_date(date_part).valid();
    let common_t = recognize_time(time_part).valid();

    let combinations = [(iso_d, iso_t), (iso_d, common_t), (common_d, iso_t), (common_d, common_t)];
    combinations
        .into_iter()
        .find_map(|(date, time)| Some(date?.and_time(time?)))
}

// ── ISO 8601 ────────────────────────────────────────────────────────────────

/// Route a strict ISO string to its kind. Space-separated input belongs to
/// the combined date + time path and is not read here.
pub(crate) fn parse_iso_by_shape(s: &str) -> Option<Temporal> {
    if s.contains(' ') {
        return None;
    }
    if patterns().time_shape.is_match(s) {
        return iso_time(s).map(Temporal::PlainTime);
    }
    let parts = iso_parts(s)?;
    match (parts.time, parts.offset, parts.zone) {
        (_, _, Some(_)) => zoned_from(&parts).map(Temporal::Zoned),
        (Some(_), Some(_), None) => instant_from(&parts).map(Temporal::Instant),
        (Some(time), None, None) => Some(Temporal::PlainDateTime(parts.date.and_time(time))),
        (None, _, None) => Some(Temporal::PlainDate(parts.date)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IsoOffset {
    Utc,
    Fixed(FixedOffset),
}

#[derive(Debug)]
struct IsoParts<'a> {
    date: NaiveDate,
    time: Option<NaiveTime>,
    offset: Option<IsoOffset>,
    zone: Option<&'a str>,
}

fn iso_parts(s: &str) -> Option<IsoParts<'_>> {
    let caps = patterns().iso.captures(s)?;

    if let Some(calendar) = caps.name("calendar") {
        if !calendar.as_str().eq_ignore_ascii_case("iso8601") {
            return None;
        }
    }

    let year = iso_year(caps.name("year")?.as_str())?;
    let month = field(&caps, "month").or_else(|| field(&caps, "bmonth"))?;
    let day = field(&caps, "day").or_else(|| field(&caps, "bday"))?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = match caps.name("hour") {
        Some(_) => Some(hms_fraction(&caps)?),
        None => None,
    };
    let offset = match caps.name("offset") {
        Some(m) => Some(parse_offset(m.as_str())?),
        None => None,
    };

    Some(IsoParts {
        date,
        time,
        offset,
        zone: caps.name("zone").map(|m| m.as_str()),
    })
}

/// Four digits, or a sign and six digits. `-000000` is not a year.
fn iso_year(s: &str) -> Option<i32> {
    if s == "-000000" {
        return None;
    }
    s.parse().ok()
}

/// Hour, then optional minute, second and fraction. A leap second (`:60`)
/// is read as `:59`.
fn hms_fraction(caps: &Captures<'_>) -> Option<NaiveTime> {
    let hour = field(caps, "hour")?;
    let minute = field(caps, "minute").unwrap_or(0);
    let second = field(caps, "second").unwrap_or(0).min(59);
    let nanos = match caps.name("fraction") {
        Some(m) => format!("{:0<9}", m.as_str()).parse().ok()?,
        None => 0,
    };
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

/// `Z`, or `±HH`, `±HH:MM` or `±HH:MM:SS` with the colons optional.
fn parse_offset(s: &str) -> Option<IsoOffset> {
    if s.eq_ignore_ascii_case("z") {
        return Some(IsoOffset::Utc);
    }
    let sign = if s.starts_with('-') { -1 } else { 1 };
    let digits: String = s[1..].chars().filter(char::is_ascii_digit).collect();
    let part = |range: std::ops::Range<usize>| -> Option<i32> {
        match digits.get(range) {
            Some("") | None => Some(0),
            Some(d) => d.parse().ok(),
        }
    };
    let (hours, minutes, seconds) = (part(0..2)?, part(2..4)?, part(4..6)?);
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds)).map(IsoOffset::Fixed)
}

pub(crate) fn iso_date(s: &str) -> Option<NaiveDate> {
    let parts = iso_parts(s)?;
    if parts.offset == Some(IsoOffset::Utc) {
        return None;
    }
    Some(parts.date)
}

pub(crate) fn iso_time(s: &str) -> Option<NaiveTime> {
    let caps = patterns().iso_time.captures(s)?;
    hms_fraction(&caps)
}

pub(crate) fn iso_date_time(s: &str) -> Option<NaiveDateTime> {
    let parts = iso_parts(s)?;
    if parts.offset == Some(IsoOffset::Utc) {
        return None;
    }
    Some(parts.date.and_time(parts.time?))
}

fn iso_instant(s: &str) -> Option<DateTime<Utc>> {
    instant_from(&iso_parts(s)?)
}

fn instant_from(parts: &IsoParts<'_>) -> Option<DateTime<Utc>> {
    let naive = parts.date.and_time(parts.time?);
    match parts.offset? {
        IsoOffset::Utc => Some(Utc.from_utc_datetime(&naive)),
        IsoOffset::Fixed(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

fn iso_zoned(s: &str) -> Option<DateTime<Tz>> {
    zoned_from(&iso_parts(s)?)
}

fn zoned_from(parts: &IsoParts<'_>) -> Option<DateTime<Tz>> {
    let tz: Tz = parts.zone?.parse().ok()?;
    let naive = parts.date.and_time(parts.time.unwrap_or(NaiveTime::MIN));
    match parts.offset {
        Some(IsoOffset::Utc) => Some(Utc.from_utc_datetime(&naive).with_timezone(&tz)),
        Some(IsoOffset::Fixed(offset)) => resolve_with_offset(&naive, tz, offset),
        None => resolve_local(&naive, tz).ok(),
    }
}

// ── Field helpers ───────────────────────────────────────────────────────────

fn num(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

fn field(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

/// Build a date, rejecting (never clamping) out-of-range months and days.
fn ymd(year: Option<u32>, month: Option<u32>, day: Option<u32>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year?).ok()?, month?, day?)
}

// ── Tests ───────────────────────────────────────────────────────────────────

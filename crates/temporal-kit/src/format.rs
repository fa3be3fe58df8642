//! Localized display and relative phrases ("in 3 days", "last month").
//!
//! Absolute formatting goes through chrono's strftime engine with a
//! [`Locale`]; month and weekday names, `%x` (locale date) and `%X` (locale
//! time) come from chrono's locale tables. Values are formatted on their own
//! wall clock; plain values are never moved into the system zone.

use std::fmt::{self, Write};

use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{DateTime, Locale, NaiveDate, NaiveTime, Utc};

use log::debug;

use crate::error::{Result, TemporalError};
use crate::types::{DateLike, Temporal};

// ── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// `Sunday, 30 November 2025`
    Full,
    /// `30 November 2025`
    Long,
    /// `30 Nov 2025`
    #[default]
    Medium,
    /// The locale's numeric date: `11/30/2025` (en_US), `30.11.2025` (de_DE).
    Short,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            DateStyle::Full => "%A, %-d %B %Y",
            DateStyle::Long => "%-d %B %Y",
            DateStyle::Medium => "%-d %b %Y",
            DateStyle::Short => "%x",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeStyle {
    /// Medium plus the zone abbreviation, for values that have a zone.
    Long,
    /// The locale's time with seconds.
    #[default]
    Medium,
    /// `15:30`
    Short,
}

impl TimeStyle {
    fn pattern(self, zoned: bool) -> &'static str {
        match (self, zoned) {
            (TimeStyle::Long, true) => "%X %Z",
            (TimeStyle::Long | TimeStyle::Medium, _) => "%X",
            (TimeStyle::Short, _) => "%H:%M",
        }
    }
}

/// How [`format_date`], [`format_time`] and [`format_date_time`] render.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub locale: Locale,
    pub date_style: DateStyle,
    pub time_style: TimeStyle,
    /// A strftime pattern that replaces both styles when set.
    pub pattern: Option<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            locale: Locale::en_US,
            date_style: DateStyle::default(),
            time_style: TimeStyle::default(),
            pattern: None,
        }
    }
}

impl FormatOptions {
    pub fn with_locale(locale: Locale) -> Self {
        FormatOptions {
            locale,
            ..Default::default()
        }
    }

    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        FormatOptions {
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }
}

// ── Absolute formatting ─────────────────────────────────────────────────────

/// Format the calendar date of `value`.
///
/// ```
/// use chrono::{Locale, NaiveDate};
/// use temporal_kit::format::{format_date, DateStyle, FormatOptions};
/// use temporal_kit::DateLike;
///
/// let date = DateLike::from(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
/// let opts = FormatOptions { date_style: DateStyle::Full, ..FormatOptions::with_locale(Locale::fr_FR) };
/// assert_eq!(format_date(&date, &opts).unwrap(), "dimanche, 30 novembre 2025");
/// ```
///
/// # Errors
///
/// [`TemporalError::InvalidFormat`] if a custom pattern is malformed or asks
/// for fields the value does not have.
pub fn format_date(value: &DateLike, options: &FormatOptions) -> Result<String> {
    let pattern = options.pattern.as_deref().unwrap_or(options.date_style.pattern());
    render_date_like(value, pattern, options.locale)
}

/// Format the time of `value`. Instants are shown in UTC.
///
/// # Errors
///
/// [`TemporalError::MissingTime`] for a plain date, otherwise as
/// [`format_date`].
pub fn format_time(value: &Temporal, options: &FormatOptions) -> Result<String> {
    let zoned = matches!(value, Temporal::Zoned(_) | Temporal::Instant(_));
    let pattern = options
        .pattern
        .as_deref()
        .unwrap_or(options.time_style.pattern(zoned));
    let locale = options.locale;

    match value {
        Temporal::PlainDate(d) => Err(TemporalError::MissingTime(format!("{d} has no time to format"))),
        Temporal::PlainTime(t) => render(DelayedFormat::new_with_locale(
            None,
            Some(*t),
            StrftimeItems::new_with_locale(pattern, locale),
            locale,
        )),
        Temporal::Instant(i) => render_instant(i, pattern, locale),
        Temporal::PlainDateTime(dt) => render_date_like(&DateLike::DateTime(*dt), pattern, locale),
        Temporal::Zoned(z) => render_date_like(&DateLike::Zoned(*z), pattern, locale),
    }
}

/// Format date and time together. A plain date is shown at midnight.
pub fn format_date_time(value: &DateLike, options: &FormatOptions) -> Result<String> {
    let pattern = match &options.pattern {
        Some(p) => p.clone(),
        None => format!(
            "{} {}",
            options.date_style.pattern(),
            options.time_style.pattern(value.zone().is_some())
        ),
    };
    let value = match value {
        DateLike::Date(d) => DateLike::DateTime(d.and_time(NaiveTime::MIN)),
        other => *other,
    };
    render_date_like(&value, &pattern, options.locale)
}

fn render_date_like(value: &DateLike, pattern: &str, locale: Locale) -> Result<String> {
    let items = StrftimeItems::new_with_locale(pattern, locale);
    match value {
        DateLike::Date(d) => render(DelayedFormat::new_with_locale(Some(*d), None, items, locale)),
        DateLike::DateTime(dt) => render(DelayedFormat::new_with_locale(
            Some(dt.date()),
            Some(dt.time()),
            items,
            locale,
        )),
        DateLike::Zoned(z) => render(z.format_localized(pattern, locale)),
    }
}

fn render_instant(instant: &DateTime<Utc>, pattern: &str, locale: Locale) -> Result<String> {
    render(instant.format_localized(pattern, locale))
}

fn render(formatted: impl fmt::Display) -> Result<String> {
    let mut out = String::new();
    write!(out, "{formatted}")
        .map_err(|_| TemporalError::InvalidFormat("pattern is invalid for this value".to_string()))?;
    Ok(out)
}

// ── Relative formatting ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RelativeUnit {
    fn name(self) -> &'static str {
        match self {
            RelativeUnit::Second => "second",
            RelativeUnit::Minute => "minute",
            RelativeUnit::Hour => "hour",
            RelativeUnit::Day => "day",
            RelativeUnit::Week => "week",
            RelativeUnit::Month => "month",
            RelativeUnit::Year => "year",
        }
    }
}

/// A signed amount of one unit; negative is in the past.
///
/// Displays as an English phrase, using words for the nearest values:
/// "today", "tomorrow", "last week", "in 3 days", "2 months ago".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    pub value: i64,
    pub unit: RelativeUnit,
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit.name();
        match (self.value, self.unit) {
            (0, RelativeUnit::Second) => f.write_str("now"),
            (0, RelativeUnit::Day) => f.write_str("today"),
            (1, RelativeUnit::Day) => f.write_str("tomorrow"),
            (-1, RelativeUnit::Day) => f.write_str("yesterday"),
            (0, _) => write!(f, "this {unit}"),
            (1, RelativeUnit::Week | RelativeUnit::Month | RelativeUnit::Year) => write!(f, "next {unit}"),
            (-1, RelativeUnit::Week | RelativeUnit::Month | RelativeUnit::Year) => write!(f, "last {unit}"),
            (n, _) => {
                let plural = if n.unsigned_abs() == 1 { "" } else { "s" };
                if n > 0 {
                    write!(f, "in {n} {unit}{plural}")
                } else {
                    write!(f, "{} {unit}{plural} ago", n.unsigned_abs())
                }
            }
        }
    }
}

/// Pick a unit for the distance between the calendar dates of `target` and
/// `base`: days below a week, weeks below 30 days, months below 365 days,
/// years beyond. Weeks, months and years are rounded to the nearest whole
/// unit (30 days per month, 365 per year).
pub fn relative_bucket(target: &DateLike, base: &DateLike) -> RelativeTime {
    day_bucket(days_between(base.date(), target.date()))
}

/// [`relative_bucket`] rendered as text for `locale`.
///
/// chrono's locale tables carry no relative phrases, so every locale is
/// rendered in English for now. Callers that need other languages can
/// render [`relative_bucket`] themselves.
///
/// ```
/// use chrono::{Locale, NaiveDate};
/// use temporal_kit::format::format_relative;
/// use temporal_kit::DateLike;
///
/// let d = |day| DateLike::from(NaiveDate::from_ymd_opt(2025, 11, day).unwrap());
/// assert_eq!(format_relative(&d(28), &d(30), Locale::en_US), "2 days ago");
/// assert_eq!(format_relative(&d(30), &d(30), Locale::de_DE), "today");
/// ```
pub fn format_relative(target: &DateLike, base: &DateLike, locale: Locale) -> String {
    if !format!("{locale:?}").starts_with("en") {
        debug!("no relative phrases for {locale:?}; rendering English");
    }
    relative_bucket(target, base).to_string()
}

/// Like [`relative_bucket`] but measured between two instants, so distances
/// under a day come out in seconds, minutes or hours.
pub fn relative_bucket_exact(target: &DateTime<Utc>, base: &DateTime<Utc>) -> RelativeTime {
    let seconds = target.signed_duration_since(base).num_seconds();
    let magnitude = seconds.unsigned_abs();
    if magnitude < 60 {
        RelativeTime {
            value: seconds,
            unit: RelativeUnit::Second,
        }
    } else if magnitude < 3_600 {
        RelativeTime {
            value: round_div(seconds, 60),
            unit: RelativeUnit::Minute,
        }
    } else if magnitude < 86_400 {
        RelativeTime {
            value: round_div(seconds, 3_600),
            unit: RelativeUnit::Hour,
        }
    } else {
        day_bucket(seconds / 86_400)
    }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

fn day_bucket(days: i64) -> RelativeTime {
    let (value, unit) = match days.unsigned_abs() {
        0..=6 => (days, RelativeUnit::Day),
        7..=29 => (round_div(days, 7), RelativeUnit::Week),
        30..=364 => (round_div(days, 30), RelativeUnit::Month),
        _ => (round_div(days, 365), RelativeUnit::Year),
    };
    RelativeTime { value, unit }
}

/// `n / d` rounded to the nearest integer, halves toward positive infinity.
fn round_div(n: i64, d: i64) -> i64 {
    (2 * n + d).div_euclid(2 * d)
}

// ── Tests ───────────────────────────────────────────────────────────────────

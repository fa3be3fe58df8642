//! # temporal-kit
//!
//! Date and time conveniences on top of chrono and chrono-tz.
//!
//! temporal-kit reads dates and times in the formats people actually type
//! (ISO 8601, `30.11.2025`, `11/30/2025`, `3:30 PM`) and orders, sorts,
//! steps and rounds plain dates, plain date-times, zoned date-times and
//! instants without the caller juggling their differences.
//!
//! ## Modules
//!
//! - [`parse`](mod@parse): String → the most specific value kind, via a prioritized cascade of recognizers
//! - [`compare`](mod@compare): Ordering across kinds, plus same-day/month/year/week checks
//! - [`collection`]: Min, max, closest match and sorting over slices
//! - [`range`]: Interval overlap, containment and stepping
//! - [`math`]: Calendar-correct add/subtract and start/end of a unit
//! - [`rounding`]: Round times and date-times to a unit and increment
//! - [`business`]: Weekends and working-day arithmetic
//! - [`convert`]: Conversions between kinds; "now" and "today" from a [`Clock`]
//! - [`format`](mod@format): Localized display and relative phrases
//! - [`timezone`]: IANA zone lookup and DST-aware wall-clock resolution
//! - [`validation`]: Strict ISO 8601 string checks
//! - [`clock`]: Injectable source of the current instant and zone
//! - [`types`]: [`Temporal`], [`DateLike`], [`DateValue`], [`DurationFields`]
//! - [`error`]: Error types
//!
//! The library logs through the [`log`] facade (recognizer decisions at
//! `debug`, iteration details at `trace`) and installs no logger itself.

pub mod business;
pub mod clock;
pub mod collection;
pub mod compare;
pub mod convert;
pub mod error;
pub mod format;
pub mod math;
pub mod parse;
pub mod range;
pub mod rounding;
pub mod timezone;
pub mod types;
pub mod validation;

pub use business::{add_business_days, is_business_day, is_weekend};
pub use clock::{Clock, FixedClock, SystemClock};
pub use collection::{closest_index_to, closest_to, max, min, sort_asc, sort_desc};
pub use compare::{
    compare, compare_values, is_after, is_before, is_same, is_same_day, is_same_month,
    is_same_week, is_same_year,
};
pub use convert::{from_iso, now, now_in, to_instant, to_plain_date, to_plain_date_time, to_zoned, today, today_in};
pub use error::{ParseTarget, TemporalError};
pub use format::{
    format_date, format_date_time, format_relative, format_time, relative_bucket,
    relative_bucket_exact, DateStyle, FormatOptions, RelativeTime, RelativeUnit, TimeStyle,
};
pub use math::{add, end_of, end_of_with, start_of, start_of_with, subtract, DateUnit, WeekOptions};
pub use parse::{parse, parse_date, parse_date_time, parse_instant, parse_time, parse_zoned};
pub use range::{
    each_day_of_interval, each_week_of_interval, ranges_overlap, step_interval, Interval,
    StepInterval,
};
pub use rounding::{ceil, floor, round, Roundable, RoundingMode, RoundingOptions, RoundingUnit};
pub use timezone::{is_valid_timezone, parse_timezone, resolve_local, timezone_name};
pub use types::{DateLike, DateValue, DurationFields, Temporal};
pub use validation::{is_valid_date_string, is_valid_date_time_string, is_valid_time_string};

//! Strict ISO 8601 string checks. None of these accept the common formats
//! that [`crate::parse::parse`] understands, and none trim their input.

use crate::parse::{iso_date, iso_date_time, iso_time};

/// `YYYY-MM-DD` naming a real calendar day. A trailing time is allowed.
pub fn is_valid_date_string(s: &str) -> bool {
    iso_date(s).is_some()
}

/// `HH:MM[:SS[.fff]]`, or a full ISO date-time whose time part is valid.
pub fn is_valid_time_string(s: &str) -> bool {
    iso_time(s).is_some() || iso_date_time(s).is_some()
}

/// `YYYY-MM-DDTHH:MM[:SS[.fff]]`; a space may replace the `T`.
pub fn is_valid_date_time_string(s: &str) -> bool {
    iso_date_time(s).is_some()
}

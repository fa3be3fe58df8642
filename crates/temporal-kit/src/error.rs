//! Error types for temporal-kit operations.

use std::fmt;

use thiserror::Error;

/// What a parse entry point was asked to produce.
///
/// Carried by [`TemporalError::Unparsable`] so the message can list the
/// formats that particular entry point accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTarget {
    /// [`crate::parse::parse`], which auto-detects the kind.
    Any,
    Date,
    Time,
    DateTime,
    Zoned,
    Instant,
}

impl ParseTarget {
    /// Example inputs accepted for this target, already quoted for messages.
    pub fn expected_formats(self) -> &'static str {
        match self {
            ParseTarget::Any => {
                "Expected ISO 8601 format or common date/time format. Examples: \
                 \"2025-11-30\", \"2025-11-30T15:30:00\", \"30.11.2025\", \"11/30/2025\", \"15:30:00\""
            }
            ParseTarget::Date => "Expected formats: YYYY-MM-DD, DD.MM.YYYY, MM/DD/YYYY",
            ParseTarget::Time => "Expected formats: HH:MM:SS, HH:MM, h:MM AM/PM",
            ParseTarget::DateTime => {
                "Expected formats: YYYY-MM-DDTHH:MM:SS, YYYY-MM-DD HH:MM:SS, DD.MM.YYYY HH:MM"
            }
            ParseTarget::Zoned => {
                "Expected formats: YYYY-MM-DDTHH:MM:SS[Area/City], YYYY-MM-DDTHH:MM:SS+01:00[Area/City]"
            }
            ParseTarget::Instant => "Expected formats: YYYY-MM-DDTHH:MM:SSZ, YYYY-MM-DDTHH:MM:SS+01:00",
        }
    }
}

impl fmt::Display for ParseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseTarget::Any => "date/time",
            ParseTarget::Date => "date",
            ParseTarget::Time => "time",
            ParseTarget::DateTime => "datetime",
            ParseTarget::Zoned => "zoned datetime",
            ParseTarget::Instant => "instant",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Unable to parse \"{input}\" as {kind}. {}", .kind.expected_formats())]
    Unparsable { input: String, kind: ParseTarget },

    #[error("Cannot find {0} of empty collection")]
    EmptyCollection(&'static str),

    #[error("Cannot compare a zoned date-time with an unzoned date-time")]
    MixedZoneComparison,

    #[error("Cannot order plain dates among zoned date-times from different zones")]
    MixedZoneDates,

    #[error("Missing timezone: {0}")]
    MissingTimeZone(String),

    #[error("Missing time: {0}")]
    MissingTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid rounding: {0}")]
    InvalidRounding(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl TemporalError {
    pub(crate) fn unparsable(input: &str, kind: ParseTarget) -> Self {
        TemporalError::Unparsable {
            input: input.to_string(),
            kind,
        }
    }
}

pub type Result<T> = std::result::Result<T, TemporalError>;

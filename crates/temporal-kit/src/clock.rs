//! Source of "now" and the local timezone.
//!
//! Everything that depends on the current moment takes a [`Clock`], so the
//! rest of the crate stays a set of pure functions and tests can pin time
//! with [`FixedClock`].

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::warn;

/// Source of "now" for the functions in [`crate::convert`].
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The zone used when an operation needs "local" time.
    fn time_zone(&self) -> Tz;
}

/// The operating system clock and configured timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn time_zone(&self) -> Tz {
        system_time_zone()
    }
}

/// The system's IANA zone, or UTC when it cannot be determined.
pub fn system_time_zone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            warn!("system timezone {name:?} is not in the timezone database; using UTC");
            Tz::UTC
        }),
        Err(e) => {
            warn!("could not determine system timezone ({e}); using UTC");
            Tz::UTC
        }
    }
}

/// A clock stopped at one instant in one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    zone: Tz,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>, zone: Tz) -> Self {
        FixedClock { instant, zone }
    }

    pub fn utc(instant: DateTime<Utc>) -> Self {
        FixedClock::new(instant, Tz::UTC)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn time_zone(&self) -> Tz {
        self.zone
    }
}

//! Stays
//!
//! A stay is the half-open interval of nights a booking occupies a room: the
//! check-in day is included and the check-out day is not, so two stays that
//! share a boundary date do not overlap.

use std::fmt;

use jiff::{ToSpan, civil::Date};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing a [`Stay`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StayError {
    /// Check-in is not strictly before check-out.
    #[error("check-in {check_in} must be before check-out {check_out}")]
    InvalidRange {
        /// Requested check-in date.
        check_in: Date,

        /// Requested check-out date.
        check_out: Date,
    },
}

/// A validated `[check_in, check_out)` date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStay", into = "RawStay")]
pub struct Stay {
    check_in: Date,
    check_out: Date,
}

impl Stay {
    /// Create a new stay.
    ///
    /// # Errors
    ///
    /// Returns [`StayError::InvalidRange`] when `check_in >= check_out`.
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, StayError> {
        if check_in >= check_out {
            return Err(StayError::InvalidRange {
                check_in,
                check_out,
            });
        }

        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// First night of the stay.
    pub const fn check_in(&self) -> Date {
        self.check_in
    }

    /// Departure day; not itself a night of the stay.
    pub const fn check_out(&self) -> Date {
        self.check_out
    }

    /// Number of nights covered by the stay. Always at least one.
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).get_days().unsigned_abs()
    }

    /// Whether two stays share at least one night.
    pub fn overlaps(&self, other: &Stay) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Signed number of days from `today` until check-in.
    pub fn days_until_check_in(&self, today: Date) -> i64 {
        i64::from((self.check_in - today).get_days())
    }

    /// Iterate every night of the stay in ascending order.
    pub fn nights_iter(&self) -> impl Iterator<Item = Date> + use<> {
        let check_out = self.check_out;

        self.check_in
            .series(1.day())
            .take_while(move |day| *day < check_out)
    }

    /// Clip the start of the stay to `from`, returning `None` when nothing remains.
    pub fn clipped_from(&self, from: Date) -> Option<Stay> {
        Stay::new(self.check_in.max(from), self.check_out).ok()
    }
}

impl fmt::Display for Stay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

#[derive(Serialize, Deserialize)]
struct RawStay {
    check_in: Date,
    check_out: Date,
}

impl TryFrom<RawStay> for Stay {
    type Error = StayError;

    fn try_from(raw: RawStay) -> Result<Self, Self::Error> {
        Stay::new(raw.check_in, raw.check_out)
    }
}

impl From<Stay> for RawStay {
    fn from(stay: Stay) -> Self {
        RawStay {
            check_in: stay.check_in,
            check_out: stay.check_out,
        }
    }
}

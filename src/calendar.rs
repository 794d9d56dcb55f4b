//! Availability calendar
//!
//! Computes the bookable nights of a room over a rolling horizon.

use jiff::{ToSpan, civil::Date};
use rustc_hash::FxHashSet;

use crate::stay::Stay;

/// Days after today included in the standard availability horizon.
pub const STANDARD_HORIZON_DAYS: i64 = 90;

/// Rolling window of dates, `today..=today + horizon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityCalendar {
    start: Date,
    end: Date,
}

impl AvailabilityCalendar {
    /// Create a calendar spanning `horizon_days` days after `today`, inclusive at both ends.
    pub fn new(today: Date, horizon_days: i64) -> Self {
        Self {
            start: today,
            end: today.saturating_add(horizon_days.max(0).days()),
        }
    }

    /// Calendar using [`STANDARD_HORIZON_DAYS`].
    pub fn standard(today: Date) -> Self {
        Self::new(today, STANDARD_HORIZON_DAYS)
    }

    /// First day of the window.
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the window, inclusive.
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Every day in the window.
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;

        self.start.series(1.day()).take_while(move |day| *day <= end)
    }

    /// Days in the window not covered by any of the given stays, ascending.
    ///
    /// Stays that end before the window starts are ignored, as are the parts of
    /// a stay that fall before it.
    pub fn free_dates<'a, I>(&self, stays: I) -> Vec<Date>
    where
        I: IntoIterator<Item = &'a Stay>,
    {
        let booked: FxHashSet<Date> = stays
            .into_iter()
            .filter_map(|stay| stay.clipped_from(self.start))
            .flat_map(|stay| stay.nights_iter().take_while(|night| *night <= self.end))
            .collect();

        self.days().filter(|day| !booked.contains(day)).collect()
    }
}

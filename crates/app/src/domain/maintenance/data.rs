//! Maintenance Data

use std::fmt;

use smallvec::SmallVec;

/// One of the independent sweeps run on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    RefundPromotion,
    BookingCompletion,
    OtpPurge,
}

impl Sweep {
    pub const fn as_str(self) -> &'static str {
        match self {
            Sweep::RefundPromotion => "refund_promotion",
            Sweep::BookingCompletion => "booking_completion",
            Sweep::OtpPurge => "otp_purge",
        }
    }
}

impl fmt::Display for Sweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a maintenance tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub refunds_completed: u64,
    pub bookings_completed: u64,
    pub otps_purged: u64,

    /// Sweeps that failed and were rolled back.
    pub failed: SmallVec<[Sweep; 3]>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Rows changed across every sweep.
    pub fn total(&self) -> u64 {
        self.refunds_completed
            .saturating_add(self.bookings_completed)
            .saturating_add(self.otps_purged)
    }
}

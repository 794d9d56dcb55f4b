//! Bookings Data

use roomkeeper::{
    addons::AddonToken,
    policies::{RefundTier, Settlement},
    pricing::Quote,
    stay::Stay,
};

use crate::domain::{
    bookings::records::{
        BookingAddonRecord, BookingRecord, BookingUuid, GuestUuid, PaymentRecord, RefundRecord,
        RescheduleRecord,
    },
    rooms::records::RoomUuid,
};

/// New Booking Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub uuid: BookingUuid,
    pub guest: GuestUuid,
    pub room: RoomUuid,
    pub stay: Stay,
    pub addons: Vec<AddonToken>,
}

/// A committed booking with its charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBooking {
    pub booking: BookingRecord,
    pub payment: PaymentRecord,
    pub addons: Vec<BookingAddonRecord>,
    pub quote: Quote,
}

/// A committed cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    pub booking: BookingRecord,
    pub refund: RefundRecord,
    pub tier: RefundTier,
    pub message: String,
}

/// A committed reschedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rescheduled {
    pub booking: BookingRecord,
    pub reschedule: RescheduleRecord,
    pub settlement: Settlement,
    pub paid_amount: u64,
    pub new_total_amount: u64,
    pub payment: Option<PaymentRecord>,
    pub refund: Option<RefundRecord>,
}

/// Result of a reschedule request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RescheduleOutcome {
    /// The booking moved to the new dates.
    Rescheduled(Box<Rescheduled>),

    /// The room is taken for the new dates; nothing changed. Lists rooms of a
    /// compatible capacity that are free instead.
    Unavailable { available_rooms: Vec<RoomUuid> },
}

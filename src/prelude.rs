//! Roomkeeper prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    addons::{AddonToken, AddonTokenError, parse_addon_tokens},
    calendar::{AvailabilityCalendar, STANDARD_HORIZON_DAYS},
    policies::{
        CancellationPolicy, CancellationQuote, RefundTier, RescheduleError, ReschedulePolicy,
        Settlement,
    },
    pricing::{AddonLine, MAX_BASE_PRICE, PricingError, Quote, percent_of, quote, room_amount},
    status::{BookingStatus, PaymentStatus, RefundStatus, RoomStatus, UnknownStatus},
    stay::{Stay, StayError},
};

//! Booking Records

use jiff::Timestamp;
use roomkeeper::{
    status::{BookingStatus, PaymentStatus, RefundStatus},
    stay::Stay,
};

use crate::{domain::rooms::records::RoomUuid, uuids::TypedUuid};

/// Booking UUID
pub type BookingUuid = TypedUuid<BookingRecord>;

/// Booking Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub uuid: BookingUuid,
    pub guest_uuid: GuestUuid,
    pub room_uuid: RoomUuid,
    pub stay: Stay,
    pub total_amount: u64,
    pub status: BookingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Guest UUID
pub type GuestUuid = TypedUuid<GuestRecord>;

/// Guest Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRecord {
    pub uuid: GuestUuid,
    pub name: String,
    pub email: String,
}

/// Addon UUID
pub type AddonUuid = TypedUuid<AddonRecord>;

/// Addon Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonRecord {
    pub uuid: AddonUuid,
    pub name: String,
    pub base_price: u64,
}

/// Booking Addon UUID
pub type BookingAddonUuid = TypedUuid<BookingAddonRecord>;

/// Booking Addon Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingAddonRecord {
    pub uuid: BookingAddonUuid,
    pub booking_uuid: BookingUuid,
    pub addon_uuid: AddonUuid,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
}

/// Payment UUID
pub type PaymentUuid = TypedUuid<PaymentRecord>;

/// Payment Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub uuid: PaymentUuid,
    pub booking_uuid: BookingUuid,
    pub amount: u64,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
}

/// Refund UUID
pub type RefundUuid = TypedUuid<RefundRecord>;

/// Refund Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundRecord {
    pub uuid: RefundUuid,
    pub payment_uuid: PaymentUuid,
    pub total_amount: u64,
    pub refund_amount: u64,
    pub reason: String,
    pub status: RefundStatus,
    pub created_at: Timestamp,
}

/// Reschedule UUID
pub type RescheduleUuid = TypedUuid<RescheduleRecord>;

/// Reschedule marker. At most one exists per booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleRecord {
    pub uuid: RescheduleUuid,
    pub booking_uuid: BookingUuid,
    pub previous_stay: Stay,
    pub new_stay: Stay,
    pub created_at: Timestamp,
}

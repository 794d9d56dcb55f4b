//! Booking Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomkeeper_app::domain::bookings::{filters::Paginated, records::BookingRecord};

/// Booking Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingResponse {
    /// The unique identifier of the booking
    pub uuid: Uuid,

    /// The guest who made the booking
    pub guest: Uuid,

    /// The booked room
    pub room: Uuid,

    /// First night of the stay
    pub check_in: String,

    /// Departure day; not a night of the stay
    pub check_out: String,

    /// Number of nights
    pub nights: u32,

    /// Current amount charged for the booking in minor units
    pub total_amount: u64,

    /// Booking status
    pub status: String,

    /// The date and time the booking was created
    pub created_at: String,

    /// The date and time the booking was last updated
    pub updated_at: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(booking: BookingRecord) -> Self {
        BookingResponse {
            uuid: booking.uuid.into(),
            guest: booking.guest_uuid.into(),
            room: booking.room_uuid.into(),
            check_in: booking.stay.check_in().to_string(),
            check_out: booking.stay.check_out().to_string(),
            nights: booking.stay.nights(),
            total_amount: booking.total_amount,
            status: booking.status.to_string(),
            created_at: booking.created_at.to_string(),
            updated_at: booking.updated_at.to_string(),
        }
    }
}

/// A page of bookings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingsPageResponse {
    /// Bookings on this page
    pub items: Vec<BookingResponse>,

    /// Number of bookings across all pages
    pub total: u64,

    /// One-based page number
    pub page: u32,

    /// Page size
    pub per_page: u32,

    /// Number of pages
    pub total_pages: u64,
}

impl From<Paginated<BookingRecord>> for BookingsPageResponse {
    fn from(page: Paginated<BookingRecord>) -> Self {
        BookingsPageResponse {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        }
    }
}

//! Create Booking Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomkeeper::addons::parse_addon_tokens;
use roomkeeper_app::domain::bookings::{
    data::{CreatedBooking, NewBooking},
    records::{BookingAddonRecord, BookingUuid, GuestUuid, PaymentRecord},
};

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse, observe},
    extensions::*,
    params::parse_stay,
    state::State,
};

/// Create Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookingRequest {
    /// Room to book
    pub room: Uuid,

    /// First night, `YYYY-MM-DD`
    pub check_in: String,

    /// Departure day, `YYYY-MM-DD`
    pub check_out: String,

    /// Addons as `"<addon_id>:<quantity>"` tokens
    #[serde(default)]
    pub addons: Vec<String>,
}

impl CreateBookingRequest {
    fn into_new_booking(self, guest: GuestUuid) -> Result<NewBooking, StatusError> {
        let stay = parse_stay(&self.check_in, &self.check_out)?;
        let addons = parse_addon_tokens(&self.addons).or_400("invalid addon")?;

        Ok(NewBooking {
            uuid: BookingUuid::new(),
            guest,
            room: self.room.into(),
            stay,
            addons,
        })
    }
}

/// Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    /// The unique identifier of the payment
    pub uuid: Uuid,

    /// Amount in minor units
    pub amount: u64,

    /// Payment status
    pub status: String,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(payment: PaymentRecord) -> Self {
        PaymentResponse {
            uuid: payment.uuid.into(),
            amount: payment.amount,
            status: payment.status.to_string(),
        }
    }
}

/// Booked Addon Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookedAddonResponse {
    /// Addon identifier
    pub addon: Uuid,

    /// Addon name at the time of booking
    pub name: String,

    /// Units ordered
    pub quantity: u32,

    /// Price per unit at the time of booking
    pub unit_price: u64,
}

impl From<BookingAddonRecord> for BookedAddonResponse {
    fn from(addon: BookingAddonRecord) -> Self {
        BookedAddonResponse {
            addon: addon.addon_uuid.into(),
            name: addon.name,
            quantity: addon.quantity,
            unit_price: addon.unit_price,
        }
    }
}

/// Booking Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingCreatedResponse {
    /// The confirmed booking
    pub booking: BookingResponse,

    /// The charge taken for it
    pub payment: PaymentResponse,

    /// Ordered addons
    pub addons: Vec<BookedAddonResponse>,

    /// Room price for the stay
    pub room_amount: u64,

    /// Price of every addon
    pub addon_amount: u64,
}

impl From<CreatedBooking> for BookingCreatedResponse {
    fn from(created: CreatedBooking) -> Self {
        BookingCreatedResponse {
            booking: created.booking.into(),
            payment: created.payment.into(),
            addons: created.addons.into_iter().map(Into::into).collect(),
            room_amount: created.quote.room_amount,
            addon_amount: created.quote.addon_amount,
        }
    }
}

/// Create Booking Handler
///
/// Prices the stay and addons, confirms the booking and charges it in full.
#[endpoint(
    tags("bookings"),
    summary = "Create Booking",
    responses(
        (status_code = StatusCode::CREATED, description = "Booking confirmed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid request or room unavailable"),
        (status_code = StatusCode::NOT_FOUND, description = "Room, guest or addon not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let guest = depot.guest_uuid_or_401()?;
    let booking = json.into_inner().into_new_booking(guest)?;

    let result = state
        .app
        .bookings
        .create_booking(booking, state.today())
        .await;

    let created = observe("create", result).map_err(into_status_error)?;
    let uuid = created.booking.uuid;

    res.add_header(LOCATION, format!("/booking/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

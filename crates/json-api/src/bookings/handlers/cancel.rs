//! Cancel Booking Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomkeeper_app::domain::bookings::data::Cancellation;

use crate::{
    bookings::{errors::into_status_error, observe},
    extensions::*,
    state::State,
};

/// Cancel Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancelBookingRequest {
    /// Booking to cancel
    pub booking: Uuid,

    /// Why the guest is cancelling
    pub reason: String,
}

/// Booking Cancelled Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingCancelledResponse {
    /// The cancelled booking
    pub booking: Uuid,

    /// Booking status after cancellation
    pub status: String,

    /// Refund bracket applied
    pub tier: String,

    /// Amount originally paid
    pub total_amount: u64,

    /// Amount that will be returned
    pub refund_amount: u64,

    /// Refund status
    pub refund_status: String,

    /// Guest facing summary
    pub message: String,
}

impl From<Cancellation> for BookingCancelledResponse {
    fn from(cancellation: Cancellation) -> Self {
        BookingCancelledResponse {
            booking: cancellation.booking.uuid.into(),
            status: cancellation.booking.status.to_string(),
            tier: cancellation.tier.as_str().to_string(),
            total_amount: cancellation.refund.total_amount,
            refund_amount: cancellation.refund.refund_amount,
            refund_status: cancellation.refund.status.to_string(),
            message: cancellation.message,
        }
    }
}

/// Cancel Booking Handler
///
/// Cancels a confirmed booking and schedules its refund.
#[endpoint(
    tags("bookings"),
    summary = "Cancel Booking",
    responses(
        (status_code = StatusCode::OK, description = "Booking cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Booking is not confirmed"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking or payment not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CancelBookingRequest>,
    depot: &mut Depot,
) -> Result<Json<BookingCancelledResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let result = state
        .app
        .bookings
        .cancel_booking(request.booking.into(), request.reason, state.today())
        .await;

    let cancellation = observe("cancel", result).map_err(into_status_error)?;

    Ok(Json(cancellation.into()))
}

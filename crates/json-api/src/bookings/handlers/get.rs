//! Get Booking Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    state::State,
};

/// Get Booking Handler
///
/// Returns a booking.
#[endpoint(tags("bookings"), summary = "Get Booking")]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .get_booking(booking.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}

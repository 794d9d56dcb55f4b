//! Check Availability Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomkeeper_app::domain::rooms::records::AvailableDates;

use crate::{extensions::*, rooms::errors::into_status_error, state::State};

/// Check Availability Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckAvailabilityRequest {
    /// Room to inspect
    pub room: Uuid,
}

/// Available Dates Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailableDatesResponse {
    /// The inspected room
    pub room: Uuid,

    /// First day of the window
    pub from: String,

    /// Last day of the window, inclusive
    pub to: String,

    /// Days on which no confirmed booking occupies the room
    pub available_dates: Vec<String>,
}

impl From<AvailableDates> for AvailableDatesResponse {
    fn from(dates: AvailableDates) -> Self {
        AvailableDatesResponse {
            room: dates.room.into(),
            from: dates.from.to_string(),
            to: dates.to.to_string(),
            available_dates: dates
                .available_dates
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Check Availability Handler
///
/// Lists the free days of a room from today over the next 90 days.
#[endpoint(
    tags("bookings"),
    summary = "Check Room Availability",
    responses(
        (status_code = StatusCode::OK, description = "Free days of the room"),
        (status_code = StatusCode::NOT_FOUND, description = "Room not found or no availability data"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckAvailabilityRequest>,
    depot: &mut Depot,
) -> Result<Json<AvailableDatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let dates = state
        .app
        .rooms
        .available_dates(json.into_inner().room.into(), state.today())
        .await
        .map_err(into_status_error)?;

    Ok(Json(dates.into()))
}

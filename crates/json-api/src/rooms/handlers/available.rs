//! Available Rooms Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomkeeper_app::domain::rooms::{data::Occupancy, records::AvailableRooms};

use crate::{
    extensions::*, observability::observe_room_search, params::parse_stay,
    rooms::errors::into_status_error, state::State,
};

/// Available Rooms Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailableRoomsResponse {
    /// Rooms free for the whole stay
    pub available_rooms: Vec<Uuid>,

    /// Number of rooms
    pub count: usize,
}

impl From<AvailableRooms> for AvailableRoomsResponse {
    fn from(rooms: AvailableRooms) -> Self {
        AvailableRoomsResponse {
            available_rooms: rooms.available_rooms.into_iter().map(Into::into).collect(),
            count: rooms.count,
        }
    }
}

/// Available Rooms Handler
///
/// Lists rooms that can host the party and have no confirmed booking
/// overlapping the stay.
#[endpoint(
    tags("rooms"),
    summary = "Available Rooms",
    responses(
        (status_code = StatusCode::OK, description = "Free rooms"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid dates"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    check_in: QueryParam<String, true>,
    check_out: QueryParam<String, true>,
    adults: QueryParam<u32, false>,
    children: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<AvailableRoomsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let stay = parse_stay(&check_in, &check_out)?;

    let occupancy = Occupancy {
        adults: adults.into_inner().unwrap_or(1),
        children: children.into_inner().unwrap_or(0),
    };

    let rooms = state
        .app
        .rooms
        .available_rooms(stay, occupancy)
        .await
        .map_err(into_status_error)?;

    observe_room_search("available_rooms", rooms.count);

    Ok(Json(rooms.into()))
}

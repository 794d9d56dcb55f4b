//! Update Room Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomkeeper::status::RoomStatus;

use crate::{
    extensions::*,
    rooms::{errors::into_status_error, models::RoomResponse},
    state::State,
};

/// Update Room Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateRoomStatusRequest {
    /// New status: available, occupied or maintenance
    pub status: String,
}

/// Update Room Status Handler
///
/// Moves a room between available, occupied and maintenance.
#[endpoint(
    tags("rooms"),
    summary = "Update Room Status",
    responses(
        (status_code = StatusCode::OK, description = "Room updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or no change"),
        (status_code = StatusCode::NOT_FOUND, description = "Room not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    json: JsonBody<UpdateRoomStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<RoomResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .parse::<RoomStatus>()
        .or_400("invalid room status")?;

    let room = state
        .app
        .rooms
        .update_room_status(room.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(room.into()))
}

//! Get Room Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    rooms::{errors::into_status_error, models::RoomResponse},
    state::State,
};

/// Get Room Handler
///
/// Returns a room with its floor and type.
#[endpoint(tags("rooms"), summary = "Get Room")]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RoomResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let room = state
        .app
        .rooms
        .get_room(room.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(room.into()))
}

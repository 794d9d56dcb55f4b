//! Room Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomkeeper_app::domain::rooms::records::RoomRecord;

/// Room Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoomResponse {
    /// The unique identifier of the room
    pub uuid: Uuid,

    /// Room number shown to guests
    pub room_number: u32,

    /// Operational status
    pub status: String,

    /// Floor the room is on
    pub floor_number: i32,

    /// Room type name
    pub room_type: String,

    /// Nightly price in minor units
    pub base_price: u64,

    /// Size in square metres
    pub room_size: u32,

    /// Adults the room can host
    pub max_adults: u32,

    /// Children the room can host
    pub max_children: u32,
}

impl From<RoomRecord> for RoomResponse {
    fn from(room: RoomRecord) -> Self {
        RoomResponse {
            uuid: room.uuid.into(),
            room_number: room.room_number,
            status: room.status.to_string(),
            floor_number: room.floor_number,
            room_type: room.room_type_name,
            base_price: room.base_price,
            room_size: room.room_size,
            max_adults: room.max_adults,
            max_children: room.max_children,
        }
    }
}

/// Rooms Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoomsResponse {
    /// Matching rooms, ordered by room number
    pub rooms: Vec<RoomResponse>,

    /// Number of rooms
    pub count: usize,
}

impl From<Vec<RoomRecord>> for RoomsResponse {
    fn from(rooms: Vec<RoomRecord>) -> Self {
        RoomsResponse {
            count: rooms.len(),
            rooms: rooms.into_iter().map(Into::into).collect(),
        }
    }
}

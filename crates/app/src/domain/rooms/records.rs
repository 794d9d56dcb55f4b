//! Room Records

use jiff::{Timestamp, civil::Date};
use roomkeeper::status::RoomStatus;

use crate::uuids::TypedUuid;

/// Room UUID
pub type RoomUuid = TypedUuid<RoomRecord>;

/// Room Type Record
#[derive(Debug)]
pub struct RoomTypeRecord;

/// Room Type UUID
pub type RoomTypeUuid = TypedUuid<RoomTypeRecord>;

/// Floor Record
#[derive(Debug)]
pub struct FloorRecord;

/// Floor UUID
pub type FloorUuid = TypedUuid<FloorRecord>;

/// Feature Record
#[derive(Debug)]
pub struct FeatureRecord;

/// Feature UUID
pub type FeatureUuid = TypedUuid<FeatureRecord>;

/// Bed Type Record
#[derive(Debug)]
pub struct BedTypeRecord;

/// Bed Type UUID
pub type BedTypeUuid = TypedUuid<BedTypeRecord>;

/// Room Record, joined with its room type and floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub uuid: RoomUuid,
    pub room_number: u32,
    pub status: RoomStatus,
    pub floor_uuid: FloorUuid,
    pub floor_number: i32,
    pub room_type_uuid: RoomTypeUuid,
    pub room_type_name: String,
    pub base_price: u64,
    pub room_size: u32,
    pub max_adults: u32,
    pub max_children: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Bookable dates of a room over the availability horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableDates {
    pub room: RoomUuid,
    pub from: Date,
    pub to: Date,
    pub available_dates: Vec<Date>,
}

/// Rooms free for a stay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableRooms {
    pub available_rooms: Vec<RoomUuid>,
    pub count: usize,
}

impl From<Vec<RoomUuid>> for AvailableRooms {
    fn from(available_rooms: Vec<RoomUuid>) -> Self {
        Self {
            count: available_rooms.len(),
            available_rooms,
        }
    }
}

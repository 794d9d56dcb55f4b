//! Rooms Data

use roomkeeper::stay::Stay;

use crate::domain::rooms::records::{BedTypeUuid, FeatureUuid, RoomRecord};

/// Requested number of guests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub adults: u32,
    pub children: u32,
}

impl Occupancy {
    /// Whether a room can host this party.
    pub fn fits(&self, room: &RoomRecord) -> bool {
        room.max_adults >= self.adults && room.max_children >= self.children
    }
}

/// Compound room search. Unset criteria do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilter {
    /// Upper bound on the nightly base price.
    pub max_price: Option<u64>,
    pub min_size: Option<u32>,
    pub max_size: Option<u32>,
    pub floor_number: Option<i32>,
    /// Case-insensitive substring of the room type name.
    pub room_type_name: Option<String>,
    /// Minimum review rating, 1 to 5.
    pub min_rating: Option<u8>,
    pub features: Vec<FeatureUuid>,
    pub bed_types: Vec<BedTypeUuid>,
    pub occupancy: Option<Occupancy>,
    /// Exclude rooms with a confirmed booking overlapping this stay.
    pub stay: Option<Stay>,
}

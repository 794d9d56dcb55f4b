//! Filter Rooms Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use roomkeeper_app::domain::rooms::data::{Occupancy, RoomFilter};

use crate::{
    extensions::*,
    observability::observe_room_search,
    params::parse_stay,
    rooms::{errors::into_status_error, models::RoomsResponse},
    state::State,
};

/// Room search query. Unset parameters do not constrain the result.
#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct RoomFilterQuery {
    /// Highest nightly price
    pub max_price: Option<u64>,

    /// Smallest room size
    pub min_size: Option<u32>,

    /// Largest room size
    pub max_size: Option<u32>,

    /// Floor number
    pub floor_number: Option<i32>,

    /// Part of the room type name, case-insensitive
    pub room_type: Option<String>,

    /// Minimum review rating, 1 to 5
    pub min_rating: Option<u8>,

    /// Comma separated feature ids; rooms must have every one
    pub features: Option<String>,

    /// Comma separated bed type ids; rooms must have every one
    pub bed_types: Option<String>,

    /// Adults to host
    pub adults: Option<u32>,

    /// Children to host
    pub children: Option<u32>,

    /// Exclude rooms booked from this day, requires `check_out`
    pub check_in: Option<String>,

    /// Exclude rooms booked until this day, requires `check_in`
    pub check_out: Option<String>,
}

fn parse_ids<T: std::str::FromStr>(value: Option<&str>, field: &str) -> Result<Vec<T>, StatusError>
where
    T::Err: std::fmt::Display,
{
    value
        .into_iter()
        .flat_map(|ids| ids.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| id.parse::<T>().or_400(&format!("invalid id in \"{field}\"")))
        .collect()
}

impl RoomFilterQuery {
    fn to_filter(&self) -> Result<RoomFilter, StatusError> {
        if let Some(rating) = self.min_rating
            && !(1..=5).contains(&rating)
        {
            return Err(StatusError::bad_request().brief("min_rating must be between 1 and 5"));
        }

        let stay = match (&self.check_in, &self.check_out) {
            (Some(check_in), Some(check_out)) => Some(parse_stay(check_in, check_out)?),
            (None, None) => None,
            _ => {
                return Err(StatusError::bad_request()
                    .brief("check_in and check_out must be supplied together"));
            }
        };

        let occupancy = (self.adults.is_some() || self.children.is_some()).then(|| Occupancy {
            adults: self.adults.unwrap_or(0),
            children: self.children.unwrap_or(0),
        });

        Ok(RoomFilter {
            max_price: self.max_price,
            min_size: self.min_size,
            max_size: self.max_size,
            floor_number: self.floor_number,
            room_type_name: self.room_type.clone(),
            min_rating: self.min_rating,
            features: parse_ids(self.features.as_deref(), "features")?,
            bed_types: parse_ids(self.bed_types.as_deref(), "bed_types")?,
            occupancy,
            stay,
        })
    }
}

/// Filter Rooms Handler
///
/// Returns rooms matching every supplied criterion, ordered by room number.
#[endpoint(
    tags("rooms"),
    summary = "Filter Rooms",
    responses(
        (status_code = StatusCode::OK, description = "Matching rooms"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter parameters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    query: RoomFilterQuery,
    depot: &mut Depot,
) -> Result<Json<RoomsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filter = query.to_filter()?;

    let rooms = state
        .app
        .rooms
        .filter_rooms(filter)
        .await
        .map_err(into_status_error)?;

    observe_room_search("filter", rooms.len());

    Ok(Json(rooms.into()))
}

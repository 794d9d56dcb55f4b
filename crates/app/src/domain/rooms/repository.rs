//! Rooms Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use roomkeeper::{status::RoomStatus, stay::Stay};
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
    query_scalar,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    columns::{
        amount_to_i64, contains_pattern, try_get_amount, try_get_status, try_get_stay, try_get_u32,
    },
    reviews::records::ReviewDocumentUuid,
    rooms::{
        data::{Occupancy, RoomFilter},
        records::{FloorUuid, RoomRecord, RoomTypeUuid, RoomUuid},
    },
};

const ROOM_SELECT_SQL: &str = include_str!("sql/room_select.sql");
const GET_ROOM_SQL: &str = concat!(include_str!("sql/room_select.sql"), " WHERE r.uuid = $1");
const LOCK_ROOM_SQL: &str = concat!(
    include_str!("sql/room_select.sql"),
    " WHERE r.uuid = $1 FOR UPDATE OF r"
);
const HAS_OVERLAPPING_BOOKING_SQL: &str = include_str!("sql/has_overlapping_booking.sql");
const COUNT_ROOM_BOOKINGS_SQL: &str = include_str!("sql/count_room_bookings.sql");
const LIST_BOOKED_STAYS_SQL: &str = include_str!("sql/list_booked_stays.sql");
const LIST_AVAILABLE_ROOMS_SQL: &str = include_str!("sql/list_available_rooms.sql");
const UPDATE_ROOM_STATUS_SQL: &str = include_str!("sql/update_room_status.sql");
const CREATE_ROOM_STATUS_HISTORY_SQL: &str = include_str!("sql/create_room_status_history.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRoomsRepository;

impl PgRoomsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<Option<RoomRecord>, sqlx::Error> {
        query_as::<Postgres, RoomRecord>(GET_ROOM_SQL)
            .bind(room.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch a room and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<Option<RoomRecord>, sqlx::Error> {
        query_as::<Postgres, RoomRecord>(LOCK_ROOM_SQL)
            .bind(room.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "rooms.repository.has_overlapping_booking",
        skip(self, tx),
        fields(room_uuid = %room, stay = %stay),
        err
    )]
    pub(crate) async fn has_overlapping_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        stay: Stay,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(HAS_OVERLAPPING_BOOKING_SQL)
            .bind(room.into_uuid())
            .bind(SqlxDate::from(stay.check_in()))
            .bind(SqlxDate::from(stay.check_out()))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_room_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_ROOM_BOOKINGS_SQL)
            .bind(room.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Confirmed stays on a room that have not checked out before `from`.
    pub(crate) async fn list_booked_stays(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        from: Date,
    ) -> Result<Vec<Stay>, sqlx::Error> {
        let rows = query(LIST_BOOKED_STAYS_SQL)
            .bind(room.into_uuid())
            .bind(SqlxDate::from(from))
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| try_get_stay(row, "check_in", "check_out"))
            .collect()
    }

    #[tracing::instrument(
        name = "rooms.repository.list_available_rooms",
        skip(self, tx),
        fields(stay = %stay, available_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_available_rooms(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stay: Stay,
        occupancy: Occupancy,
    ) -> Result<Vec<RoomUuid>, sqlx::Error> {
        let uuids: Vec<Uuid> = query_scalar(LIST_AVAILABLE_ROOMS_SQL)
            .bind(SqlxDate::from(stay.check_in()))
            .bind(SqlxDate::from(stay.check_out()))
            .bind(to_i32(occupancy.adults, "adults")?)
            .bind(to_i32(occupancy.children, "children")?)
            .fetch_all(&mut **tx)
            .await?;

        tracing::Span::current().record("available_count", uuids.len());

        Ok(uuids.into_iter().map(RoomUuid::from_uuid).collect())
    }

    #[tracing::instrument(
        name = "rooms.repository.filter_rooms",
        skip(self, tx, filter, rated_documents),
        fields(matched_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn filter_rooms(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &RoomFilter,
        rated_documents: Option<&[ReviewDocumentUuid]>,
    ) -> Result<Vec<RoomRecord>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(ROOM_SELECT_SQL);

        builder.push(" WHERE TRUE");

        if let Some(max_price) = filter.max_price {
            builder
                .push(" AND rt.base_price <= ")
                .push_bind(amount_to_i64(max_price, "base_price")?);
        }

        if let Some(min_size) = filter.min_size {
            builder
                .push(" AND rt.room_size >= ")
                .push_bind(to_i32(min_size, "room_size")?);
        }

        if let Some(max_size) = filter.max_size {
            builder
                .push(" AND rt.room_size <= ")
                .push_bind(to_i32(max_size, "room_size")?);
        }

        if let Some(floor_number) = filter.floor_number {
            builder
                .push(" AND f.floor_number = ")
                .push_bind(floor_number);
        }

        if let Some(name) = filter.room_type_name.as_deref() {
            builder
                .push(" AND rt.name ILIKE ")
                .push_bind(contains_pattern(name));
        }

        if let Some(documents) = rated_documents {
            let documents: Vec<Uuid> = documents
                .iter()
                .copied()
                .map(ReviewDocumentUuid::into_uuid)
                .collect();

            builder
                .push(" AND r.uuid IN (SELECT rr.room_uuid FROM room_reviews rr WHERE rr.document_uuid = ANY(")
                .push_bind(documents)
                .push("))");
        }

        if !filter.features.is_empty() {
            let features: Vec<Uuid> = filter.features.iter().map(|f| f.into_uuid()).collect();

            builder
                .push(" AND EXISTS (SELECT 1 FROM room_type_features rtf WHERE rtf.room_type_uuid = rt.uuid AND rtf.feature_uuid = ANY(")
                .push_bind(features)
                .push("))");
        }

        if !filter.bed_types.is_empty() {
            let bed_types: Vec<Uuid> = filter.bed_types.iter().map(|b| b.into_uuid()).collect();

            builder
                .push(" AND EXISTS (SELECT 1 FROM room_type_bed_types rtb WHERE rtb.room_type_uuid = rt.uuid AND rtb.bed_type_uuid = ANY(")
                .push_bind(bed_types)
                .push("))");
        }

        if let Some(occupancy) = filter.occupancy {
            builder
                .push(" AND rt.max_adults >= ")
                .push_bind(to_i32(occupancy.adults, "adults")?)
                .push(" AND rt.max_children >= ")
                .push_bind(to_i32(occupancy.children, "children")?);
        }

        if let Some(stay) = filter.stay {
            builder
                .push(" AND NOT EXISTS (SELECT 1 FROM bookings b WHERE b.room_uuid = r.uuid AND b.booking_status = 'confirmed' AND b.check_in < ")
                .push_bind(SqlxDate::from(stay.check_out()))
                .push(" AND b.check_out > ")
                .push_bind(SqlxDate::from(stay.check_in()))
                .push(")");
        }

        builder.push(" ORDER BY r.room_number");

        let rooms = builder
            .build_query_as::<RoomRecord>()
            .fetch_all(&mut **tx)
            .await?;

        tracing::Span::current().record("matched_count", rooms.len());

        debug!(matched_count = rooms.len(), "filtered rooms");

        Ok(rooms)
    }

    pub(crate) async fn update_room_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        status: RoomStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ROOM_STATUS_SQL)
            .bind(room.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_room_status_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        from: RoomStatus,
        to: RoomStatus,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ROOM_STATUS_HISTORY_SQL)
            .bind(Uuid::now_v7())
            .bind(room.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn to_i32(value: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for RoomRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RoomUuid::from_uuid(row.try_get("uuid")?),
            room_number: try_get_u32(row, "room_number")?,
            status: try_get_status(row, "status")?,
            floor_uuid: FloorUuid::from_uuid(row.try_get("floor_uuid")?),
            floor_number: row.try_get("floor_number")?,
            room_type_uuid: RoomTypeUuid::from_uuid(row.try_get("room_type_uuid")?),
            room_type_name: row.try_get("room_type_name")?,
            base_price: try_get_amount(row, "base_price")?,
            room_size: try_get_u32(row, "room_size")?,
            max_adults: try_get_u32(row, "max_adults")?,
            max_children: try_get_u32(row, "max_children")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_i32_rejects_values_beyond_i32() {
        assert!(to_i32(u32::MAX, "adults").is_err());
        assert!(matches!(to_i32(4, "adults"), Ok(4)));
    }
}

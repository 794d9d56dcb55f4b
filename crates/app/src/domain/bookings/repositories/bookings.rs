//! Bookings Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use roomkeeper::{status::BookingStatus, stay::Stay};
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
    query_scalar,
};
use uuid::Uuid;

use crate::domain::{
    bookings::{
        filters::{BookingFilter, BookingPredicate, BookingSearch, Page},
        records::{BookingRecord, BookingUuid, GuestUuid},
    },
    columns::{amount_to_i64, contains_pattern, try_get_amount, try_get_status, try_get_stay},
    rooms::records::RoomUuid,
};

const BOOKING_SELECT_SQL: &str = include_str!("../sql/booking_select.sql");
const CREATE_BOOKING_SQL: &str = include_str!("../sql/create_booking.sql");
const GET_BOOKING_SQL: &str = include_str!("../sql/get_booking.sql");
const LOCK_BOOKING_SQL: &str = include_str!("../sql/lock_booking.sql");
const UPDATE_BOOKING_STATUS_SQL: &str = include_str!("../sql/update_booking_status.sql");
const UPDATE_BOOKING_STAY_SQL: &str = include_str!("../sql/update_booking_stay.sql");
const LIST_BOOKINGS_SQL: &str = include_str!("../sql/list_bookings.sql");
const COUNT_BOOKINGS_SQL: &str = include_str!("../sql/count_bookings.sql");
const CREATE_BOOKING_STATUS_HISTORY_SQL: &str =
    include_str!("../sql/create_booking_status_history.sql");
const SEARCH_BOOKINGS_SQL: &str = include_str!("../sql/search_bookings.sql");
const COUNT_BOOKING_SEARCH_SQL: &str = include_str!("../sql/count_booking_search.sql");

/// Text a search term is matched against: booking, guest and room columns.
const SEARCH_DOCUMENT_SQL: &str = "concat_ws(' ', b.uuid::text, b.booking_status, \
    b.check_in::text, b.check_out::text, u.name, u.email, r.room_number::text)";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "bookings.repository.create_booking",
        skip(self, tx),
        fields(booking_uuid = %booking, room_uuid = %room, stay = %stay),
        err
    )]
    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        guest: GuestUuid,
        room: RoomUuid,
        stay: Stay,
        total_amount: u64,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(CREATE_BOOKING_SQL)
            .bind(booking.into_uuid())
            .bind(guest.into_uuid())
            .bind(room.into_uuid())
            .bind(SqlxDate::from(stay.check_in()))
            .bind(SqlxDate::from(stay.check_out()))
            .bind(amount_to_i64(total_amount, "total_amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(GET_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a booking and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LOCK_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_booking_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        status: BookingStatus,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(UPDATE_BOOKING_STATUS_SQL)
            .bind(booking.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_booking_stay(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        stay: Stay,
        total_amount: u64,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(UPDATE_BOOKING_STAY_SQL)
            .bind(booking.into_uuid())
            .bind(SqlxDate::from(stay.check_in()))
            .bind(SqlxDate::from(stay.check_out()))
            .bind(amount_to_i64(total_amount, "total_amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_status_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_BOOKING_STATUS_HISTORY_SQL)
            .bind(Uuid::now_v7())
            .bind(booking.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
    ) -> Result<(Vec<BookingRecord>, i64), sqlx::Error> {
        let bookings = query_as::<Postgres, BookingRecord>(LIST_BOOKINGS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_BOOKINGS_SQL)
            .fetch_one(&mut **tx)
            .await?;

        Ok((bookings, total))
    }

    #[tracing::instrument(
        name = "bookings.repository.filter_bookings",
        skip(self, tx, filter),
        fields(predicate_count = filter.predicates().len(), total = tracing::field::Empty),
        err
    )]
    pub(crate) async fn filter_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &BookingFilter,
        page: Page,
    ) -> Result<(Vec<BookingRecord>, i64), sqlx::Error> {
        let mut select = QueryBuilder::<Postgres>::new(BOOKING_SELECT_SQL);

        push_predicates(&mut select, filter)?;

        select
            .push(" ORDER BY created_at DESC, uuid DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let bookings = select
            .build_query_as::<BookingRecord>()
            .fetch_all(&mut **tx)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM bookings");

        push_predicates(&mut count, filter)?;

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("total", total);

        Ok((bookings, total))
    }

    #[tracing::instrument(
        name = "bookings.repository.search_bookings",
        skip(self, tx, search),
        fields(total = tracing::field::Empty),
        err
    )]
    pub(crate) async fn search_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        search: &BookingSearch,
        page: Page,
    ) -> Result<(Vec<BookingRecord>, i64), sqlx::Error> {
        let mut select = QueryBuilder::<Postgres>::new(SEARCH_BOOKINGS_SQL);

        push_search(&mut select, search);

        select
            .push(" ORDER BY ")
            .push(SEARCH_DOCUMENT_SQL)
            .push(" ILIKE ")
            .push_bind(contains_pattern(search.term()))
            .push(" DESC, word_similarity(")
            .push_bind(search.term().to_owned())
            .push(", ")
            .push(SEARCH_DOCUMENT_SQL)
            .push(") DESC, b.created_at DESC, b.uuid DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let bookings = select
            .build_query_as::<BookingRecord>()
            .fetch_all(&mut **tx)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new(COUNT_BOOKING_SEARCH_SQL);

        push_search(&mut count, search);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("total", total);

        Ok((bookings, total))
    }
}

/// Substring match, falling back to trigram word similarity.
fn push_search(builder: &mut QueryBuilder<'_, Postgres>, search: &BookingSearch) {
    builder
        .push(" WHERE ")
        .push(SEARCH_DOCUMENT_SQL)
        .push(" ILIKE ")
        .push_bind(contains_pattern(search.term()))
        .push(" OR word_similarity(")
        .push_bind(search.term().to_owned())
        .push(", ")
        .push(SEARCH_DOCUMENT_SQL)
        .push(") >= ")
        .push_bind(BookingSearch::FUZZY_THRESHOLD);
}

fn push_predicates(
    builder: &mut QueryBuilder<'_, Postgres>,
    filter: &BookingFilter,
) -> Result<(), sqlx::Error> {
    builder.push(" WHERE TRUE");

    for predicate in filter.predicates() {
        builder.push(" AND ");

        match *predicate {
            BookingPredicate::CheckIn(comparison, date) => {
                builder
                    .push("check_in")
                    .push(comparison.as_sql())
                    .push_bind(SqlxDate::from(date));
            }
            BookingPredicate::CheckOut(comparison, date) => {
                builder
                    .push("check_out")
                    .push(comparison.as_sql())
                    .push_bind(SqlxDate::from(date));
            }
            BookingPredicate::TotalAmount(comparison, amount) => {
                builder
                    .push("total_amount")
                    .push(comparison.as_sql())
                    .push_bind(amount_to_i64(amount, "total_amount")?);
            }
            BookingPredicate::Status(status) => {
                builder.push("booking_status = ").push_bind(status.as_str());
            }
            BookingPredicate::Room(room) => {
                builder.push("room_uuid = ").push_bind(room.into_uuid());
            }
            BookingPredicate::Guest(guest) => {
                builder.push("user_uuid = ").push_bind(guest.into_uuid());
            }
        }
    }

    Ok(())
}

impl<'r> FromRow<'r, PgRow> for BookingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BookingUuid::from_uuid(row.try_get("uuid")?),
            guest_uuid: GuestUuid::from_uuid(row.try_get("user_uuid")?),
            room_uuid: RoomUuid::from_uuid(row.try_get("room_uuid")?),
            stay: try_get_stay(row, "check_in", "check_out")?,
            total_amount: try_get_amount(row, "total_amount")?,
            status: try_get_status(row, "booking_status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

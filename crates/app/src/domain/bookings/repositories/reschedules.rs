//! Reschedules Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use roomkeeper::stay::Stay;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    bookings::records::{BookingUuid, RescheduleRecord, RescheduleUuid},
    columns::try_get_stay,
};

const RESCHEDULE_EXISTS_SQL: &str = include_str!("../sql/reschedule_exists.sql");
const CREATE_RESCHEDULE_SQL: &str = include_str!("../sql/create_reschedule.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReschedulesRepository;

impl PgReschedulesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn reschedule_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(RESCHEDULE_EXISTS_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert the marker row. A second insert for the same booking violates its unique key.
    pub(crate) async fn create_reschedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        previous_stay: Stay,
        new_stay: Stay,
    ) -> Result<RescheduleRecord, sqlx::Error> {
        query_as::<Postgres, RescheduleRecord>(CREATE_RESCHEDULE_SQL)
            .bind(RescheduleUuid::new().into_uuid())
            .bind(booking.into_uuid())
            .bind(SqlxDate::from(previous_stay.check_in()))
            .bind(SqlxDate::from(previous_stay.check_out()))
            .bind(SqlxDate::from(new_stay.check_in()))
            .bind(SqlxDate::from(new_stay.check_out()))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RescheduleRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RescheduleUuid::from_uuid(row.try_get("uuid")?),
            booking_uuid: BookingUuid::from_uuid(row.try_get("booking_uuid")?),
            previous_stay: try_get_stay(row, "previous_check_in", "previous_check_out")?,
            new_stay: try_get_stay(row, "new_check_in", "new_check_out")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

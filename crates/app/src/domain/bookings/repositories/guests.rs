//! Guests Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::bookings::records::{GuestRecord, GuestUuid};

const GET_GUEST_SQL: &str = include_str!("../sql/get_guest.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGuestsRepository;

impl PgGuestsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_guest(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        guest: GuestUuid,
    ) -> Result<Option<GuestRecord>, sqlx::Error> {
        query_as::<Postgres, GuestRecord>(GET_GUEST_SQL)
            .bind(guest.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for GuestRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: GuestUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        })
    }
}

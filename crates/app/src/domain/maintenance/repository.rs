//! Maintenance Repository

use jiff::{Timestamp, civil::Date};
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{Postgres, Transaction, query};

const PROMOTE_REFUNDS_SQL: &str = include_str!("sql/promote_refunds.sql");
const COMPLETE_BOOKINGS_SQL: &str = include_str!("sql/complete_bookings.sql");
const PURGE_EXPIRED_OTPS_SQL: &str = include_str!("sql/purge_expired_otps.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMaintenanceRepository;

impl PgMaintenanceRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Approved refunds at least two calendar days old become completed.
    pub(crate) async fn promote_refunds(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(PROMOTE_REFUNDS_SQL)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }

    /// Confirmed bookings that have checked out become completed. Returns the
    /// number of history rows written, one per promoted booking.
    pub(crate) async fn complete_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        today: Date,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(COMPLETE_BOOKINGS_SQL)
            .bind(SqlxDate::from(today))
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }

    pub(crate) async fn purge_expired_otps(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(PURGE_EXPIRED_OTPS_SQL)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }
}

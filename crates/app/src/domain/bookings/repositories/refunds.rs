//! Refunds Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    bookings::records::{PaymentUuid, RefundRecord, RefundUuid},
    columns::{amount_to_i64, try_get_amount, try_get_status},
};

const CREATE_REFUND_SQL: &str = include_str!("../sql/create_refund.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRefundsRepository;

impl PgRefundsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "refunds.repository.create_refund",
        skip(self, tx, reason),
        fields(payment_uuid = %payment),
        err
    )]
    pub(crate) async fn create_refund(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        total_amount: u64,
        refund_amount: u64,
        reason: &str,
    ) -> Result<RefundRecord, sqlx::Error> {
        query_as::<Postgres, RefundRecord>(CREATE_REFUND_SQL)
            .bind(RefundUuid::new().into_uuid())
            .bind(payment.into_uuid())
            .bind(amount_to_i64(total_amount, "total_amount")?)
            .bind(amount_to_i64(refund_amount, "refund_amount")?)
            .bind(reason)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RefundRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RefundUuid::from_uuid(row.try_get("uuid")?),
            payment_uuid: PaymentUuid::from_uuid(row.try_get("payment_uuid")?),
            total_amount: try_get_amount(row, "total_amount")?,
            refund_amount: try_get_amount(row, "refund_amount")?,
            reason: row.try_get("reason")?,
            status: try_get_status(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

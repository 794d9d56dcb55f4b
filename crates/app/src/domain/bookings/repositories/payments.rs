//! Payments Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use roomkeeper::status::PaymentStatus;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    bookings::records::{BookingUuid, PaymentRecord, PaymentUuid},
    columns::{amount_to_i64, try_get_amount, try_get_status},
};

const CREATE_PAYMENT_SQL: &str = include_str!("../sql/create_payment.sql");
const LOCK_FIRST_PAID_PAYMENT_SQL: &str = include_str!("../sql/lock_first_paid_payment.sql");
const UPDATE_PAYMENT_STATUS_SQL: &str = include_str!("../sql/update_payment_status.sql");
const LIST_BOOKING_PAYMENTS_SQL: &str = include_str!("../sql/list_booking_payments.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentsRepository;

impl PgPaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "payments.repository.create_payment",
        skip(self, tx),
        fields(booking_uuid = %booking),
        err
    )]
    pub(crate) async fn create_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        amount: u64,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(CREATE_PAYMENT_SQL)
            .bind(PaymentUuid::new().into_uuid())
            .bind(booking.into_uuid())
            .bind(amount_to_i64(amount, "amount")?)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// The booking's original charge: its earliest payment still marked paid.
    pub(crate) async fn lock_first_paid_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Option<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(LOCK_FIRST_PAID_PAYMENT_SQL)
            .bind(booking.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(UPDATE_PAYMENT_STATUS_SQL)
            .bind(payment.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_booking_payments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Vec<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(LIST_BOOKING_PAYMENTS_SQL)
            .bind(booking.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PaymentUuid::from_uuid(row.try_get("uuid")?),
            booking_uuid: BookingUuid::from_uuid(row.try_get("booking_uuid")?),
            amount: try_get_amount(row, "amount")?,
            status: try_get_status(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

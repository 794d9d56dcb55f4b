//! Test Helpers
//!
//! Fixture rows are written straight to the database; the services under test
//! only ever read them.

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use roomkeeper::{status::BookingStatus, stay::Stay};
use sqlx::{query, query_scalar};
use uuid::Uuid;

use crate::{
    domain::{
        bookings::{
            records::{AddonUuid, BookingUuid, GuestUuid, PaymentRecord},
            repositories::PgPaymentsRepository,
        },
        rooms::records::RoomUuid,
    },
    test::TestContext,
};

/// A room on floor 1 with its own room type.
pub(crate) async fn create_room(
    ctx: &TestContext,
    room_number: i32,
    base_price: u64,
    max_adults: i32,
    max_children: i32,
) -> Result<RoomUuid, sqlx::Error> {
    let pool = ctx.db.pool();

    let floor: Uuid = query_scalar(
        "INSERT INTO floors (uuid, floor_number) VALUES ($1, 1) \
         ON CONFLICT (floor_number) DO UPDATE SET floor_number = EXCLUDED.floor_number \
         RETURNING uuid",
    )
    .bind(Uuid::now_v7())
    .fetch_one(pool)
    .await?;

    let room_type = Uuid::now_v7();

    query(
        "INSERT INTO room_types (uuid, name, base_price, room_size, max_adults, max_children) \
         VALUES ($1, $2, $3, 25, $4, $5)",
    )
    .bind(room_type)
    .bind(format!("Type {room_number}"))
    .bind(i64::try_from(base_price).unwrap_or(i64::MAX))
    .bind(max_adults)
    .bind(max_children)
    .execute(pool)
    .await?;

    let room = RoomUuid::new();

    query("INSERT INTO rooms (uuid, room_number, room_type_uuid, floor_uuid) VALUES ($1, $2, $3, $4)")
        .bind(room.into_uuid())
        .bind(room_number)
        .bind(room_type)
        .bind(floor)
        .execute(pool)
        .await?;

    Ok(room)
}

pub(crate) async fn create_guest(ctx: &TestContext, email: &str) -> Result<GuestUuid, sqlx::Error> {
    let guest = GuestUuid::new();

    query("INSERT INTO users (uuid, name, email) VALUES ($1, $2, $3)")
        .bind(guest.into_uuid())
        .bind("Test Guest")
        .bind(email)
        .execute(ctx.db.pool())
        .await?;

    Ok(guest)
}

pub(crate) async fn create_addon(
    ctx: &TestContext,
    name: &str,
    base_price: i64,
) -> Result<AddonUuid, sqlx::Error> {
    let addon = AddonUuid::new();

    query("INSERT INTO addons (uuid, name, base_price) VALUES ($1, $2, $3)")
        .bind(addon.into_uuid())
        .bind(name)
        .bind(base_price)
        .execute(ctx.db.pool())
        .await?;

    Ok(addon)
}

/// Insert a booking row directly, bypassing pricing and payments.
pub(crate) async fn insert_booking(
    ctx: &TestContext,
    guest: GuestUuid,
    room: RoomUuid,
    stay: Stay,
    status: &str,
) -> Result<BookingUuid, sqlx::Error> {
    let booking = BookingUuid::new();

    query(
        "INSERT INTO bookings (uuid, user_uuid, room_uuid, check_in, check_out, total_amount, booking_status) \
         VALUES ($1, $2, $3, $4, $5, 1000, $6)",
    )
    .bind(booking.into_uuid())
    .bind(guest.into_uuid())
    .bind(room.into_uuid())
    .bind(SqlxDate::from(stay.check_in()))
    .bind(SqlxDate::from(stay.check_out()))
    .bind(status)
    .execute(ctx.db.pool())
    .await?;

    Ok(booking)
}

pub(crate) async fn insert_refund_at(
    ctx: &TestContext,
    booking: BookingUuid,
    created_at: Timestamp,
) -> Result<(), sqlx::Error> {
    query(
        "WITH payment AS ( \
             INSERT INTO payments (uuid, booking_uuid, amount, status) \
             VALUES ($1, $2, 1000, 'refunded') \
             RETURNING uuid \
         ) \
         INSERT INTO refunds (uuid, payment_uuid, total_amount, refund_amount, reason, created_at) \
         SELECT $3, payment.uuid, 1000, 800, 'test', $4 FROM payment",
    )
    .bind(Uuid::now_v7())
    .bind(booking.into_uuid())
    .bind(Uuid::now_v7())
    .bind(SqlxTimestamp::from(created_at))
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

pub(crate) async fn insert_otp(
    ctx: &TestContext,
    email: &str,
    expires_at: Timestamp,
) -> Result<(), sqlx::Error> {
    query("INSERT INTO otps (uuid, email, code, expires_at) VALUES ($1, $2, '123456', $3)")
        .bind(Uuid::now_v7())
        .bind(email)
        .bind(SqlxTimestamp::from(expires_at))
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

pub(crate) async fn count_otps(ctx: &TestContext) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM otps")
        .fetch_one(ctx.db.pool())
        .await
}

pub(crate) async fn booking_status(
    ctx: &TestContext,
    booking: BookingUuid,
) -> Result<BookingStatus, sqlx::Error> {
    let status: String = query_scalar("SELECT booking_status FROM bookings WHERE uuid = $1")
        .bind(booking.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

    status.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

pub(crate) async fn refund_status(
    ctx: &TestContext,
    booking: BookingUuid,
) -> Result<String, sqlx::Error> {
    query_scalar(
        "SELECT refunds.status FROM refunds \
         JOIN payments ON payments.uuid = refunds.payment_uuid \
         WHERE payments.booking_uuid = $1",
    )
    .bind(booking.into_uuid())
    .fetch_one(ctx.db.pool())
    .await
}

pub(crate) async fn list_payments(
    ctx: &TestContext,
    booking: BookingUuid,
) -> Result<Vec<PaymentRecord>, sqlx::Error> {
    let mut tx = ctx.db.begin().await?;

    let payments = PgPaymentsRepository::new()
        .list_booking_payments(&mut tx, booking)
        .await?;

    tx.commit().await?;

    Ok(payments)
}

pub(crate) async fn count_booking_status_history(
    ctx: &TestContext,
    booking: BookingUuid,
) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM booking_status_history WHERE booking_uuid = $1")
        .bind(booking.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
}

pub(crate) async fn count_room_status_history(
    ctx: &TestContext,
    room: RoomUuid,
) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM room_status_history WHERE room_uuid = $1")
        .bind(room.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
}

pub(crate) async fn count_reschedules(
    ctx: &TestContext,
    booking: BookingUuid,
) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM reschedules WHERE booking_uuid = $1")
        .bind(booking.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
}

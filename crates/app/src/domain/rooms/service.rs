//! Rooms service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use roomkeeper::{calendar::AvailabilityCalendar, status::RoomStatus, stay::Stay};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        reviews::ReviewStore,
        rooms::{
            data::{Occupancy, RoomFilter},
            errors::RoomsServiceError,
            records::{AvailableDates, AvailableRooms, RoomRecord, RoomUuid},
            repository::PgRoomsRepository,
        },
    },
};

#[derive(Clone)]
pub struct PgRoomsService {
    db: Db,
    repository: PgRoomsRepository,
    reviews: Arc<dyn ReviewStore>,
}

impl PgRoomsService {
    #[must_use]
    pub fn new(db: Db, reviews: Arc<dyn ReviewStore>) -> Self {
        Self {
            db,
            repository: PgRoomsRepository::new(),
            reviews,
        }
    }
}

impl std::fmt::Debug for PgRoomsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgRoomsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RoomsService for PgRoomsService {
    async fn get_room(&self, room: RoomUuid) -> Result<RoomRecord, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_room(&mut tx, room)
            .await?
            .ok_or(RoomsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "rooms.service.check_availability",
        skip(self),
        fields(room_uuid = %room, stay = %stay, available = tracing::field::Empty),
        err
    )]
    async fn check_availability(
        &self,
        room: RoomUuid,
        stay: Stay,
    ) -> Result<bool, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .get_room(&mut tx, room)
            .await?
            .ok_or(RoomsServiceError::NotFound)?;

        let available = !self
            .repository
            .has_overlapping_booking(&mut tx, room, stay)
            .await?;

        tx.commit().await?;

        Span::current().record("available", available);

        Ok(available)
    }

    #[tracing::instrument(
        name = "rooms.service.available_dates",
        skip(self),
        fields(room_uuid = %room, available_count = tracing::field::Empty),
        err
    )]
    async fn available_dates(
        &self,
        room: RoomUuid,
        today: Date,
    ) -> Result<AvailableDates, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .get_room(&mut tx, room)
            .await?
            .ok_or(RoomsServiceError::NotFound)?;

        // A room that has never been booked reports not found rather than fully free.
        if self.repository.count_room_bookings(&mut tx, room).await? == 0 {
            return Err(RoomsServiceError::NoAvailableDates);
        }

        let stays = self
            .repository
            .list_booked_stays(&mut tx, room, today)
            .await?;

        tx.commit().await?;

        let calendar = AvailabilityCalendar::standard(today);
        let available_dates = calendar.free_dates(&stays);

        Span::current().record("available_count", available_dates.len());

        if available_dates.is_empty() {
            return Err(RoomsServiceError::NoAvailableDates);
        }

        Ok(AvailableDates {
            room,
            from: calendar.start(),
            to: calendar.end(),
            available_dates,
        })
    }

    async fn available_rooms(
        &self,
        stay: Stay,
        occupancy: Occupancy,
    ) -> Result<AvailableRooms, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let rooms = self
            .repository
            .list_available_rooms(&mut tx, stay, occupancy)
            .await?;

        tx.commit().await?;

        Ok(AvailableRooms::from(rooms))
    }

    #[tracing::instrument(
        name = "rooms.service.filter_rooms",
        skip(self, filter),
        fields(min_rating = ?filter.min_rating, has_stay = filter.stay.is_some()),
        err
    )]
    async fn filter_rooms(&self, filter: RoomFilter) -> Result<Vec<RoomRecord>, RoomsServiceError> {
        let rated_documents = match filter.min_rating {
            Some(min_rating) => Some(self.reviews.documents_with_min_rating(min_rating).await?),
            None => None,
        };

        let mut tx = self.db.begin().await?;

        let rooms = self
            .repository
            .filter_rooms(&mut tx, &filter, rated_documents.as_deref())
            .await?;

        tx.commit().await?;

        Ok(rooms)
    }

    #[tracing::instrument(
        name = "rooms.service.update_room_status",
        skip(self),
        fields(room_uuid = %room, to_status = %status, from_status = tracing::field::Empty),
        err
    )]
    async fn update_room_status(
        &self,
        room: RoomUuid,
        status: RoomStatus,
    ) -> Result<RoomRecord, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .lock_room(&mut tx, room)
            .await?
            .ok_or(RoomsServiceError::NotFound)?;

        Span::current().record("from_status", current.status.as_str());

        if current.status == status {
            return Err(RoomsServiceError::InvalidState(format!(
                "room is already {status}"
            )));
        }

        self.repository
            .update_room_status(&mut tx, room, status)
            .await?;

        self.repository
            .create_room_status_history(&mut tx, room, current.status, status)
            .await?;

        let updated = self
            .repository
            .get_room(&mut tx, room)
            .await?
            .ok_or(RoomsServiceError::NotFound)?;

        tx.commit().await?;

        info!(room_uuid = %room, from = %current.status, to = %status, "updated room status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait RoomsService: Send + Sync {
    /// Retrieve a single room.
    async fn get_room(&self, room: RoomUuid) -> Result<RoomRecord, RoomsServiceError>;

    /// Whether no confirmed booking on the room overlaps the stay.
    async fn check_availability(&self, room: RoomUuid, stay: Stay)
    -> Result<bool, RoomsServiceError>;

    /// Free dates of a room from `today` over the standard horizon.
    async fn available_dates(
        &self,
        room: RoomUuid,
        today: Date,
    ) -> Result<AvailableDates, RoomsServiceError>;

    /// Rooms able to host the party that are free for the whole stay.
    async fn available_rooms(
        &self,
        stay: Stay,
        occupancy: Occupancy,
    ) -> Result<AvailableRooms, RoomsServiceError>;

    /// Compound room search.
    async fn filter_rooms(&self, filter: RoomFilter) -> Result<Vec<RoomRecord>, RoomsServiceError>;

    /// Change the operational status of a room, recording the transition.
    async fn update_room_status(
        &self,
        room: RoomUuid,
        status: RoomStatus,
    ) -> Result<RoomRecord, RoomsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{ToSpan, civil::date};
    use roomkeeper::status::RoomStatus;
    use testresult::TestResult;

    use crate::{
        domain::rooms::data::{Occupancy, RoomFilter},
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn check_availability_ignores_adjacent_and_cancelled_bookings() -> TestResult {
        let ctx = TestContext::new().await;
        let room = helpers::create_room(&ctx, 101, 1000, 2, 1).await?;
        let guest = helpers::create_guest(&ctx, "guest@example.com").await?;

        helpers::insert_booking(
            &ctx,
            guest,
            room,
            Stay::new(date(2026, 1, 10), date(2026, 1, 13))?,
            "confirmed",
        )
        .await?;

        helpers::insert_booking(
            &ctx,
            guest,
            room,
            Stay::new(date(2026, 1, 20), date(2026, 1, 25))?,
            "cancelled",
        )
        .await?;

        let adjacent = Stay::new(date(2026, 1, 13), date(2026, 1, 15))?;
        let overlapping = Stay::new(date(2026, 1, 12), date(2026, 1, 14))?;
        let over_cancelled = Stay::new(date(2026, 1, 21), date(2026, 1, 22))?;

        assert!(ctx.rooms.check_availability(room, adjacent).await?);
        assert!(!ctx.rooms.check_availability(room, overlapping).await?);
        assert!(ctx.rooms.check_availability(room, over_cancelled).await?);

        Ok(())
    }

    #[tokio::test]
    async fn check_availability_unknown_room_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .rooms
            .check_availability(
                RoomUuid::new(),
                Stay::new(date(2026, 1, 10), date(2026, 1, 11))?,
            )
            .await;

        assert!(
            matches!(result, Err(RoomsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn available_dates_excludes_booked_nights() -> TestResult {
        let ctx = TestContext::new().await;
        let room = helpers::create_room(&ctx, 102, 1000, 2, 0).await?;
        let guest = helpers::create_guest(&ctx, "dates@example.com").await?;
        let today = date(2026, 1, 1);

        helpers::insert_booking(
            &ctx,
            guest,
            room,
            Stay::new(date(2026, 1, 5), date(2026, 1, 7))?,
            "confirmed",
        )
        .await?;

        let dates = ctx.rooms.available_dates(room, today).await?;

        assert_eq!(dates.from, today);
        assert_eq!(dates.to, today.saturating_add(90.days()));
        assert_eq!(dates.available_dates.len(), 91 - 2);
        assert!(!dates.available_dates.contains(&date(2026, 1, 5)));
        assert!(!dates.available_dates.contains(&date(2026, 1, 6)));
        assert!(dates.available_dates.contains(&date(2026, 1, 7)));

        Ok(())
    }

    #[tokio::test]
    async fn available_dates_never_booked_room_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let room = helpers::create_room(&ctx, 103, 1000, 2, 0).await?;

        let result = ctx.rooms.available_dates(room, date(2026, 1, 1)).await;

        assert!(
            matches!(result, Err(RoomsServiceError::NoAvailableDates)),
            "expected NoAvailableDates, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn available_rooms_filters_capacity_and_overlap() -> TestResult {
        let ctx = TestContext::new().await;
        let small = helpers::create_room(&ctx, 201, 800, 1, 0).await?;
        let booked = helpers::create_room(&ctx, 202, 1200, 2, 2).await?;
        let free = helpers::create_room(&ctx, 203, 1200, 2, 2).await?;
        let guest = helpers::create_guest(&ctx, "rooms@example.com").await?;

        let stay = Stay::new(date(2026, 2, 1), date(2026, 2, 4))?;

        helpers::insert_booking(&ctx, guest, booked, stay, "confirmed").await?;

        let result = ctx
            .rooms
            .available_rooms(
                stay,
                Occupancy {
                    adults: 2,
                    children: 1,
                },
            )
            .await?;

        assert_eq!(result.available_rooms, vec![free]);
        assert_eq!(result.count, 1);
        assert!(!result.available_rooms.contains(&small));

        Ok(())
    }

    #[tokio::test]
    async fn filter_rooms_applies_price_and_stay() -> TestResult {
        let ctx = TestContext::new().await;
        let cheap = helpers::create_room(&ctx, 301, 500, 2, 0).await?;
        let pricey = helpers::create_room(&ctx, 302, 5000, 2, 0).await?;
        let cheap_booked = helpers::create_room(&ctx, 303, 500, 2, 0).await?;
        let guest = helpers::create_guest(&ctx, "filter@example.com").await?;
        let stay = Stay::new(date(2026, 3, 1), date(2026, 3, 3))?;

        helpers::insert_booking(&ctx, guest, cheap_booked, stay, "confirmed").await?;

        let rooms = ctx
            .rooms
            .filter_rooms(RoomFilter {
                max_price: Some(1000),
                stay: Some(stay),
                ..RoomFilter::default()
            })
            .await?;

        let uuids: Vec<RoomUuid> = rooms.iter().map(|room| room.uuid).collect();

        assert_eq!(uuids, vec![cheap]);
        assert!(!uuids.contains(&pricey));

        Ok(())
    }

    #[tokio::test]
    async fn filter_rooms_orders_by_numeric_room_number() -> TestResult {
        let ctx = TestContext::new().await;
        let thousand = helpers::create_room(&ctx, 1001, 1000, 2, 0).await?;
        let ninety_nine = helpers::create_room(&ctx, 99, 1000, 2, 0).await?;

        let rooms = ctx.rooms.filter_rooms(RoomFilter::default()).await?;
        let uuids: Vec<RoomUuid> = rooms.iter().map(|room| room.uuid).collect();

        assert_eq!(uuids, vec![ninety_nine, thousand]);
        assert_eq!(rooms.first().map(|room| room.room_number), Some(99));

        Ok(())
    }

    #[tokio::test]
    async fn inventory_rejects_out_of_range_rows() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(
            helpers::create_room(&ctx, 501, 0, 2, 0).await.is_err(),
            "zero base price"
        );
        assert!(
            helpers::create_room(&ctx, 502, 1_000_001, 2, 0).await.is_err(),
            "base price above the cap"
        );
        assert!(
            helpers::create_room(&ctx, 503, 1000, 0, 0).await.is_err(),
            "no adults"
        );
        assert!(
            helpers::create_room(&ctx, 504, 1000, 11, 0).await.is_err(),
            "too many adults"
        );
        assert!(
            helpers::create_room(&ctx, 505, 1000, 2, 11).await.is_err(),
            "too many children"
        );
        assert!(
            helpers::create_room(&ctx, 0, 1000, 2, 0).await.is_err(),
            "room number zero"
        );
        assert!(
            helpers::create_room(&ctx, 10_000, 1000, 2, 0).await.is_err(),
            "room number above 9999"
        );

        helpers::create_room(&ctx, 9999, 1_000_000, 10, 10).await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_room_status_records_transition() -> TestResult {
        let ctx = TestContext::new().await;
        let room = helpers::create_room(&ctx, 401, 1000, 2, 0).await?;

        let updated = ctx
            .rooms
            .update_room_status(room, RoomStatus::Maintenance)
            .await?;

        assert_eq!(updated.status, RoomStatus::Maintenance);
        assert_eq!(helpers::count_room_status_history(&ctx, room).await?, 1);

        let result = ctx
            .rooms
            .update_room_status(room, RoomStatus::Maintenance)
            .await;

        assert!(
            matches!(result, Err(RoomsServiceError::InvalidState(_))),
            "expected InvalidState, got {result:?}"
        );

        Ok(())
    }
}

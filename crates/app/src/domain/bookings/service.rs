//! Bookings service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use roomkeeper::{
    policies::{CancellationPolicy, ReschedulePolicy, Settlement},
    pricing::{self, AddonLine},
    status::{BookingStatus, PaymentStatus},
    stay::Stay,
};
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        bookings::{
            data::{Cancellation, CreatedBooking, NewBooking, RescheduleOutcome, Rescheduled},
            errors::{BookingsServiceError, Resource},
            filters::{BookingFilter, BookingSearch, Page, Paginated},
            records::{AddonUuid, BookingRecord, BookingUuid},
            repositories::{
                PgAddonsRepository, PgBookingsRepository, PgGuestsRepository,
                PgPaymentsRepository, PgRefundsRepository, PgReschedulesRepository,
            },
        },
        rooms::{data::Occupancy, repository::PgRoomsRepository},
    },
    notifications::{Invoice, Notifier},
};

const RESCHEDULE_REFUND_REASON: &str = "rescheduled";

#[derive(Clone)]
pub struct PgBookingsService {
    db: Db,
    bookings: PgBookingsRepository,
    guests: PgGuestsRepository,
    addons: PgAddonsRepository,
    payments: PgPaymentsRepository,
    refunds: PgRefundsRepository,
    reschedules: PgReschedulesRepository,
    rooms: PgRoomsRepository,
    notifier: Arc<dyn Notifier>,
    cancellation: CancellationPolicy,
    reschedule: ReschedulePolicy,
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            bookings: PgBookingsRepository::new(),
            guests: PgGuestsRepository::new(),
            addons: PgAddonsRepository::new(),
            payments: PgPaymentsRepository::new(),
            refunds: PgRefundsRepository::new(),
            reschedules: PgReschedulesRepository::new(),
            rooms: PgRoomsRepository::new(),
            notifier,
            cancellation: CancellationPolicy::standard(),
            reschedule: ReschedulePolicy::standard(),
        }
    }
}

impl std::fmt::Debug for PgBookingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgBookingsService")
            .field("db", &self.db)
            .field("cancellation", &self.cancellation)
            .field("reschedule", &self.reschedule)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    #[tracing::instrument(
        name = "bookings.service.create_booking",
        skip(self, booking),
        fields(
            booking_uuid = %booking.uuid,
            room_uuid = %booking.room,
            stay = %booking.stay,
            addon_count = booking.addons.len(),
            total_amount = tracing::field::Empty,
        ),
        err
    )]
    async fn create_booking(
        &self,
        booking: NewBooking,
        today: Date,
    ) -> Result<CreatedBooking, BookingsServiceError> {
        if booking.stay.check_in() < today {
            return Err(BookingsServiceError::InvalidInput(
                "check-in cannot be in the past".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let guest = self
            .guests
            .get_guest(&mut tx, booking.guest)
            .await?
            .ok_or(BookingsServiceError::NotFound(Resource::Guest))?;

        // Held until commit so concurrent bookings on this room serialise here.
        let room = self
            .rooms
            .lock_room(&mut tx, booking.room)
            .await?
            .ok_or(BookingsServiceError::NotFound(Resource::Room))?;

        if self
            .rooms
            .has_overlapping_booking(&mut tx, booking.room, booking.stay)
            .await?
        {
            return Err(BookingsServiceError::RoomUnavailable);
        }

        let addon_ids: Vec<AddonUuid> = booking
            .addons
            .iter()
            .map(|token| AddonUuid::from_uuid(token.addon_id))
            .collect();

        let known_addons = self.addons.find_addons(&mut tx, &addon_ids).await?;

        let mut resolved = Vec::with_capacity(booking.addons.len());

        for (token, addon_id) in booking.addons.iter().zip(&addon_ids) {
            let addon = known_addons
                .get(addon_id)
                .ok_or(BookingsServiceError::NotFound(Resource::Addon))?;

            resolved.push((addon, token.quantity));
        }

        let lines: Vec<AddonLine> = resolved
            .iter()
            .map(|(addon, quantity)| AddonLine {
                unit_price: addon.base_price,
                quantity: *quantity,
            })
            .collect();

        let quote = pricing::quote(&booking.stay, room.base_price, &lines)?;

        Span::current().record("total_amount", quote.total);

        let record = self
            .bookings
            .create_booking(
                &mut tx,
                booking.uuid,
                booking.guest,
                booking.room,
                booking.stay,
                quote.total,
            )
            .await?;

        let mut addons = Vec::with_capacity(resolved.len());

        for (addon, quantity) in resolved {
            addons.push(
                self.addons
                    .create_booking_addon(&mut tx, record.uuid, addon, quantity)
                    .await?,
            );
        }

        let payment = self
            .payments
            .create_payment(&mut tx, record.uuid, quote.total, PaymentStatus::Paid)
            .await?;

        tx.commit().await?;

        info!(booking_uuid = %record.uuid, total_amount = quote.total, "created booking");

        let invoice = Invoice::new(&record, &guest, &room, &addons, quote, today);
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            let booking = invoice.booking;

            if let Err(error) = notifier.send(invoice.into_email()).await {
                warn!(booking_uuid = %booking, error = %error, "failed to send booking invoice");
            }
        });

        Ok(CreatedBooking {
            booking: record,
            payment,
            addons,
            quote,
        })
    }

    #[tracing::instrument(
        name = "bookings.service.cancel_booking",
        skip(self, reason),
        fields(booking_uuid = %booking, refund_amount = tracing::field::Empty),
        err
    )]
    async fn cancel_booking(
        &self,
        booking: BookingUuid,
        reason: String,
        today: Date,
    ) -> Result<Cancellation, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .bookings
            .lock_booking(&mut tx, booking)
            .await?
            .ok_or(BookingsServiceError::NotFound(Resource::Booking))?;

        if current.status != BookingStatus::Confirmed {
            return Err(BookingsServiceError::InvalidState(
                "only confirmed bookings can be cancelled".to_string(),
            ));
        }

        let quote = self
            .cancellation
            .quote(&current.stay, current.total_amount, today)?;

        Span::current().record("refund_amount", quote.refund_amount);

        let payment = self
            .payments
            .lock_first_paid_payment(&mut tx, booking)
            .await?
            .ok_or(BookingsServiceError::NotFound(Resource::Payment))?;

        let cancelled = self
            .bookings
            .update_booking_status(&mut tx, booking, BookingStatus::Cancelled)
            .await?;

        self.payments
            .update_payment_status(&mut tx, payment.uuid, PaymentStatus::Refunded)
            .await?;

        let refund = self
            .refunds
            .create_refund(
                &mut tx,
                payment.uuid,
                quote.total_amount,
                quote.refund_amount,
                &reason,
            )
            .await?;

        self.bookings
            .create_status_history(
                &mut tx,
                booking,
                BookingStatus::Confirmed,
                BookingStatus::Cancelled,
            )
            .await?;

        tx.commit().await?;

        info!(
            booking_uuid = %booking,
            tier = quote.tier.as_str(),
            refund_amount = quote.refund_amount,
            "cancelled booking"
        );

        Ok(Cancellation {
            booking: cancelled,
            refund,
            tier: quote.tier,
            message: quote.message(),
        })
    }

    #[tracing::instrument(
        name = "bookings.service.reschedule_booking",
        skip(self),
        fields(booking_uuid = %booking, stay = %stay, settlement = tracing::field::Empty),
        err
    )]
    async fn reschedule_booking(
        &self,
        booking: BookingUuid,
        stay: Stay,
        today: Date,
    ) -> Result<RescheduleOutcome, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .bookings
            .lock_booking(&mut tx, booking)
            .await?
            .ok_or(BookingsServiceError::NotFound(Resource::Booking))?;

        if current.status != BookingStatus::Confirmed {
            return Err(BookingsServiceError::InvalidState(
                "only confirmed bookings can be rescheduled".to_string(),
            ));
        }

        self.reschedule
            .ensure_not_too_late(current.stay.check_in(), today)?;

        if self.reschedules.reschedule_exists(&mut tx, booking).await? {
            return Err(BookingsServiceError::AlreadyRescheduled);
        }

        let room = self
            .rooms
            .lock_room(&mut tx, current.room_uuid)
            .await?
            .ok_or(BookingsServiceError::NotFound(Resource::Room))?;

        if self
            .rooms
            .has_overlapping_booking(&mut tx, room.uuid, stay)
            .await?
        {
            let occupancy = Occupancy {
                adults: room.max_adults,
                children: room.max_children,
            };

            let available_rooms = self
                .rooms
                .list_available_rooms(&mut tx, stay, occupancy)
                .await?;

            tx.commit().await?;

            Span::current().record("settlement", "unavailable");

            return Ok(RescheduleOutcome::Unavailable { available_rooms });
        }

        let paid_amount = current.total_amount;
        let new_total_amount = pricing::room_amount(&stay, room.base_price)?;
        let settlement = self.reschedule.settle(paid_amount, new_total_amount)?;

        let (payment, refund) = match settlement {
            Settlement::TopUp { amount } => {
                let payment = self
                    .payments
                    .create_payment(&mut tx, booking, amount, PaymentStatus::Paid)
                    .await?;

                (Some(payment), None)
            }
            Settlement::Refund {
                amount,
                refund_amount,
                ..
            } => {
                let payment = self
                    .payments
                    .create_payment(&mut tx, booking, amount, PaymentStatus::Refunded)
                    .await?;

                let refund = self
                    .refunds
                    .create_refund(
                        &mut tx,
                        payment.uuid,
                        amount,
                        refund_amount,
                        RESCHEDULE_REFUND_REASON,
                    )
                    .await?;

                (Some(payment), Some(refund))
            }
            Settlement::Even => (None, None),
        };

        let updated = self
            .bookings
            .update_booking_stay(&mut tx, booking, stay, new_total_amount)
            .await?;

        let reschedule = self
            .reschedules
            .create_reschedule(&mut tx, booking, current.stay, stay)
            .await?;

        tx.commit().await?;

        Span::current().record("settlement", settlement.difference().to_string());

        info!(
            booking_uuid = %booking,
            previous_stay = %current.stay,
            stay = %stay,
            paid_amount,
            new_total_amount,
            "rescheduled booking"
        );

        Ok(RescheduleOutcome::Rescheduled(Box::new(Rescheduled {
            booking: updated,
            reschedule,
            settlement,
            paid_amount,
            new_total_amount,
            payment,
            refund,
        })))
    }

    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.bookings.get_booking(&mut tx, booking).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_bookings(
        &self,
        page: Page,
    ) -> Result<Paginated<BookingRecord>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let (bookings, total) = self.bookings.list_bookings(&mut tx, page).await?;

        tx.commit().await?;

        Ok(Paginated::new(bookings, total.unsigned_abs(), page))
    }

    async fn filter_bookings(
        &self,
        filter: BookingFilter,
        page: Page,
    ) -> Result<Paginated<BookingRecord>, BookingsServiceError> {
        filter.ensure_not_empty()?;

        let mut tx = self.db.begin().await?;

        let (bookings, total) = self
            .bookings
            .filter_bookings(&mut tx, &filter, page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(bookings, total.unsigned_abs(), page))
    }

    #[tracing::instrument(name = "bookings.service.search_bookings", skip(self), err)]
    async fn search_bookings(
        &self,
        term: String,
        page: Page,
    ) -> Result<Paginated<BookingRecord>, BookingsServiceError> {
        let search = BookingSearch::new(&term)?;

        let mut tx = self.db.begin().await?;

        let (bookings, total) = self
            .bookings
            .search_bookings(&mut tx, &search, page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(bookings, total.unsigned_abs(), page))
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Price and confirm a new booking, charging the full amount.
    ///
    /// The invoice is delivered in the background once the booking is committed.
    async fn create_booking(
        &self,
        booking: NewBooking,
        today: Date,
    ) -> Result<CreatedBooking, BookingsServiceError>;

    /// Cancel a confirmed booking and refund it according to the cancellation tiers.
    async fn cancel_booking(
        &self,
        booking: BookingUuid,
        reason: String,
        today: Date,
    ) -> Result<Cancellation, BookingsServiceError>;

    /// Move a confirmed booking to new dates on the same room, once.
    async fn reschedule_booking(
        &self,
        booking: BookingUuid,
        stay: Stay,
        today: Date,
    ) -> Result<RescheduleOutcome, BookingsServiceError>;

    /// Retrieve a single booking.
    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError>;

    /// Newest bookings first.
    async fn list_bookings(
        &self,
        page: Page,
    ) -> Result<Paginated<BookingRecord>, BookingsServiceError>;

    /// Bookings matching every predicate of `filter`.
    async fn filter_bookings(
        &self,
        filter: BookingFilter,
        page: Page,
    ) -> Result<Paginated<BookingRecord>, BookingsServiceError>;

    /// Free-text search over booking, guest and room details, best matches first.
    async fn search_bookings(
        &self,
        term: String,
        page: Page,
    ) -> Result<Paginated<BookingRecord>, BookingsServiceError>;
}

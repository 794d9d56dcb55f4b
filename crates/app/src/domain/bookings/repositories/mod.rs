//! Booking Repositories

mod addons;
mod bookings;
mod guests;
mod payments;
mod refunds;
mod reschedules;

pub(crate) use addons::PgAddonsRepository;
pub(crate) use bookings::PgBookingsRepository;
pub(crate) use guests::PgGuestsRepository;
pub(crate) use payments::PgPaymentsRepository;
pub(crate) use refunds::PgRefundsRepository;
pub(crate) use reschedules::PgReschedulesRepository;

//! Roomkeeper Domain Concerns

pub(crate) mod columns;

pub mod bookings;
pub mod maintenance;
pub mod reviews;
pub mod rooms;

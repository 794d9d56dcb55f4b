//! Booking Handlers

pub(crate) mod cancel;
pub(crate) mod check_availability;
pub(crate) mod create;
pub(crate) mod filter;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod reschedule;
pub(crate) mod search;

//! Roomkeeper
//!
//! Roomkeeper is the booking engine behind a hotel reservation service: stay intervals,
//! pricing, refund policies and room availability, free of any storage concerns.

pub mod addons;
pub mod calendar;
pub mod policies;
pub mod prelude;
pub mod pricing;
pub mod status;
pub mod stay;

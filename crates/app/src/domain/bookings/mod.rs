//! Bookings

pub mod data;
pub mod errors;
pub mod filters;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::{BookingsServiceError, Resource};
pub use service::*;

//! Bookings

pub(crate) mod errors;
mod handlers;
pub(crate) mod models;

pub(crate) use handlers::*;

use roomkeeper_app::domain::bookings::BookingsServiceError;

use crate::observability::observe_booking_operation;

/// Record the outcome of a lifecycle operation in the metrics registry.
pub(crate) fn observe<T>(
    operation: &str,
    result: Result<T, BookingsServiceError>,
) -> Result<T, BookingsServiceError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(BookingsServiceError::Sql(_) | BookingsServiceError::InvalidAmount(_)) => "failed",
        Err(_) => "rejected",
    };

    observe_booking_operation(operation, outcome);

    result
}

//! Bookings service errors.

use std::fmt;

use roomkeeper::{
    addons::AddonTokenError,
    policies::RescheduleError,
    pricing::PricingError,
    stay::StayError,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::bookings::filters::FilterError;

const EXCLUSION_VIOLATION: &str = "23P01";
const RESCHEDULE_MARKER_CONSTRAINT: &str = "reschedules_booking_uuid_key";

/// The kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Booking,
    Room,
    Guest,
    Addon,
    Payment,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Booking => "booking",
            Resource::Room => "room",
            Resource::Guest => "guest",
            Resource::Addon => "addon",
            Resource::Payment => "payment",
        })
    }
}

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    #[error("{0} not found")]
    NotFound(Resource),

    #[error("{0}")]
    InvalidInput(String),

    #[error("check-in must be before check-out")]
    InvalidRange,

    #[error("{0}")]
    InvalidState(String),

    #[error("room is not available for the selected dates")]
    RoomUnavailable,

    #[error("too late to reschedule: bookings can only be moved up to 3 days before check-in")]
    TooLate,

    #[error("booking has already been rescheduled once")]
    AlreadyRescheduled,

    #[error("invalid amount")]
    InvalidAmount(#[from] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound(Resource::Booking);
        }

        let Some(db_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        if db_error.code().as_deref() == Some(EXCLUSION_VIOLATION) {
            return Self::RoomUnavailable;
        }

        match db_error.kind() {
            ErrorKind::UniqueViolation
                if db_error.constraint() == Some(RESCHEDULE_MARKER_CONSTRAINT) =>
            {
                Self::AlreadyRescheduled
            }
            ErrorKind::UniqueViolation => Self::InvalidState("record already exists".to_string()),
            ErrorKind::ForeignKeyViolation => {
                Self::InvalidInput("referenced record does not exist".to_string())
            }
            ErrorKind::NotNullViolation => Self::InvalidInput("missing required data".to_string()),
            ErrorKind::CheckViolation => Self::InvalidInput("invalid data".to_string()),
            ErrorKind::Other | _ => Self::Sql(error),
        }
    }
}

impl From<StayError> for BookingsServiceError {
    fn from(_: StayError) -> Self {
        Self::InvalidRange
    }
}

impl From<AddonTokenError> for BookingsServiceError {
    fn from(error: AddonTokenError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

impl From<FilterError> for BookingsServiceError {
    fn from(error: FilterError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

impl From<RescheduleError> for BookingsServiceError {
    fn from(error: RescheduleError) -> Self {
        match error {
            RescheduleError::TooLate { .. } => Self::TooLate,
            RescheduleError::Pricing(error) => Self::InvalidAmount(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn row_not_found_maps_to_booking_not_found() {
        assert!(matches!(
            BookingsServiceError::from(Error::RowNotFound),
            BookingsServiceError::NotFound(Resource::Booking)
        ));
    }

    #[test]
    fn too_late_reschedule_maps_to_too_late() {
        let error = BookingsServiceError::from(RescheduleError::TooLate {
            last_day: date(2026, 1, 7),
        });

        assert!(matches!(error, BookingsServiceError::TooLate));
    }

    #[test]
    fn malformed_addon_maps_to_invalid_input() {
        let error = BookingsServiceError::from(AddonTokenError::MissingSeparator("x".into()));

        assert!(matches!(error, BookingsServiceError::InvalidInput(_)));
    }
}

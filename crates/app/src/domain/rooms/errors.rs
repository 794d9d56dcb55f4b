//! Rooms service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::reviews::ReviewStoreError;

#[derive(Debug, Error)]
pub enum RoomsServiceError {
    #[error("room not found")]
    NotFound,

    #[error("no available dates found for this room")]
    NoAvailableDates,

    #[error("check-in must be before check-out")]
    InvalidRange,

    #[error("{0}")]
    InvalidState(String),

    #[error("invalid data")]
    InvalidData,

    #[error("review store unavailable")]
    Reviews(#[from] ReviewStoreError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RoomsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

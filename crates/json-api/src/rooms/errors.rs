//! Room Errors

use salvo::http::StatusError;
use tracing::error;

use roomkeeper_app::domain::rooms::RoomsServiceError;

pub(crate) fn into_status_error(error: RoomsServiceError) -> StatusError {
    let message = error.to_string();

    match error {
        RoomsServiceError::NotFound => StatusError::not_found()
            .brief(message)
            .detail("room_not_found"),
        RoomsServiceError::NoAvailableDates => StatusError::not_found()
            .brief(message)
            .detail("no_available_dates"),
        RoomsServiceError::InvalidRange => {
            StatusError::bad_request().brief(message).detail("invalid_range")
        }
        RoomsServiceError::InvalidState(_) => {
            StatusError::bad_request().brief(message).detail("invalid_state")
        }
        RoomsServiceError::InvalidData => {
            StatusError::bad_request().brief(message).detail("invalid_input")
        }
        RoomsServiceError::Reviews(source) => {
            error!("review store failure: {source}");

            StatusError::internal_server_error()
        }
        RoomsServiceError::Sql(source) => {
            error!("room storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

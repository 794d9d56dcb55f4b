//! Booking Errors

use salvo::http::StatusError;
use tracing::error;

use roomkeeper_app::domain::bookings::BookingsServiceError;

pub(crate) fn into_status_error(error: BookingsServiceError) -> StatusError {
    let message = error.to_string();

    match error {
        BookingsServiceError::NotFound(resource) => StatusError::not_found()
            .brief(message)
            .detail(format!("{resource}_not_found")),
        BookingsServiceError::InvalidInput(_) => {
            StatusError::bad_request().brief(message).detail("invalid_input")
        }
        BookingsServiceError::InvalidRange => {
            StatusError::bad_request().brief(message).detail("invalid_range")
        }
        BookingsServiceError::InvalidState(_) => {
            StatusError::bad_request().brief(message).detail("invalid_state")
        }
        BookingsServiceError::RoomUnavailable => {
            StatusError::bad_request().brief(message).detail("room_unavailable")
        }
        BookingsServiceError::TooLate => {
            StatusError::bad_request().brief(message).detail("too_late")
        }
        BookingsServiceError::AlreadyRescheduled => StatusError::bad_request()
            .brief(message)
            .detail("already_rescheduled"),
        BookingsServiceError::InvalidAmount(source) => {
            error!("booking amount could not be computed: {source}");

            StatusError::internal_server_error()
        }
        BookingsServiceError::Sql(source) => {
            error!("booking storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use roomkeeper_app::domain::bookings::Resource;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn test_domain_errors_map_to_client_statuses() {
        let cases = [
            (
                BookingsServiceError::NotFound(Resource::Payment),
                StatusCode::NOT_FOUND,
            ),
            (
                BookingsServiceError::InvalidInput("bad addon".into()),
                StatusCode::BAD_REQUEST,
            ),
            (BookingsServiceError::InvalidRange, StatusCode::BAD_REQUEST),
            (
                BookingsServiceError::InvalidState("cancelled".into()),
                StatusCode::BAD_REQUEST,
            ),
            (BookingsServiceError::RoomUnavailable, StatusCode::BAD_REQUEST),
            (BookingsServiceError::TooLate, StatusCode::BAD_REQUEST),
            (BookingsServiceError::AlreadyRescheduled, StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            let label = format!("{error:?}");

            assert_eq!(into_status_error(error).code, expected, "{label}");
        }
    }

    #[test]
    fn test_not_found_names_the_resource() {
        let status = into_status_error(BookingsServiceError::NotFound(Resource::Addon));

        assert_eq!(status.detail.as_deref(), Some("addon_not_found"));
        assert_eq!(status.brief, "addon not found");
    }
}

//! Filter Bookings Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;
use uuid::Uuid;

use roomkeeper::status::BookingStatus;
use roomkeeper_app::domain::bookings::filters::{BookingFilter, BookingPredicate, Comparison};

use crate::{
    bookings::{errors::into_status_error, handlers::index::page_from, models::BookingsPageResponse},
    extensions::*,
    params::parse_date,
    state::State,
};

/// Booking filter query. Every supplied parameter narrows the result.
#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct BookingFilterQuery {
    /// Bookings made by this guest
    pub guest: Option<Uuid>,

    /// Bookings of this room
    pub room: Option<Uuid>,

    /// Booking status (confirmed, cancelled, completed)
    pub booking_status: Option<String>,

    /// Check-in on or after this date
    pub check_in_from: Option<String>,

    /// Check-in on or before this date
    pub check_in_to: Option<String>,

    /// Check-out on or after this date
    pub check_out_from: Option<String>,

    /// Check-out on or before this date
    pub check_out_to: Option<String>,

    /// Minimum total amount
    pub min_total_amount: Option<u64>,

    /// Maximum total amount
    pub max_total_amount: Option<u64>,

    /// Page number, from 1
    pub page: Option<u32>,

    /// Items per page, 1 to 100
    pub per_page: Option<u32>,
}

impl BookingFilterQuery {
    fn to_filter(&self) -> Result<BookingFilter, StatusError> {
        let mut filter = BookingFilter::new();

        if let Some(guest) = self.guest {
            filter.push(BookingPredicate::Guest(guest.into()));
        }

        if let Some(room) = self.room {
            filter.push(BookingPredicate::Room(room.into()));
        }

        if let Some(status) = &self.booking_status {
            let status = status
                .parse::<BookingStatus>()
                .or_400("invalid booking_status")?;

            filter.push(BookingPredicate::Status(status));
        }

        let dates = [
            (&self.check_in_from, "check_in_from", Comparison::Gte, true),
            (&self.check_in_to, "check_in_to", Comparison::Lte, true),
            (&self.check_out_from, "check_out_from", Comparison::Gte, false),
            (&self.check_out_to, "check_out_to", Comparison::Lte, false),
        ];

        for (value, field, comparison, is_check_in) in dates {
            let Some(value) = value else {
                continue;
            };

            let day = parse_date(value, field)?;

            filter.push(if is_check_in {
                BookingPredicate::CheckIn(comparison, day)
            } else {
                BookingPredicate::CheckOut(comparison, day)
            });
        }

        if let Some(amount) = self.min_total_amount {
            filter.push(BookingPredicate::TotalAmount(Comparison::Gte, amount));
        }

        if let Some(amount) = self.max_total_amount {
            filter.push(BookingPredicate::TotalAmount(Comparison::Lte, amount));
        }

        Ok(filter)
    }
}

/// Filter Bookings Handler
///
/// Returns bookings matching every supplied condition. At least one condition
/// is required.
#[endpoint(
    tags("bookings"),
    summary = "Filter Bookings",
    responses(
        (status_code = StatusCode::OK, description = "Matching bookings"),
        (status_code = StatusCode::BAD_REQUEST, description = "No or invalid filter parameters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    query: BookingFilterQuery,
    depot: &mut Depot,
) -> Result<Json<BookingsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filter = query.to_filter()?;
    let page = page_from(query.page, query.per_page)?;

    let bookings = state
        .app
        .bookings
        .filter_bookings(filter, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(bookings.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use roomkeeper_app::domain::bookings::{
        BookingsServiceError, MockBookingsService, filters::Paginated,
    };

    use crate::test_helpers::bookings_service;

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(bookings, Router::with_path("booking/filter").get(handler))
    }

    #[test]
    fn test_query_builds_typed_predicates() -> TestResult {
        let query = BookingFilterQuery {
            booking_status: Some("confirmed".to_string()),
            check_in_from: Some("2026-03-01".to_string()),
            check_out_to: Some("2026-03-31".to_string()),
            max_total_amount: Some(5000),
            ..BookingFilterQuery::default()
        };

        let filter = query.to_filter()?;

        assert_eq!(
            filter.predicates(),
            &[
                BookingPredicate::Status(BookingStatus::Confirmed),
                BookingPredicate::CheckIn(Comparison::Gte, date(2026, 3, 1)),
                BookingPredicate::CheckOut(Comparison::Lte, date(2026, 3, 31)),
                BookingPredicate::TotalAmount(Comparison::Lte, 5000),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let query = BookingFilterQuery {
            booking_status: Some("pending".to_string()),
            ..BookingFilterQuery::default()
        };

        assert!(query.to_filter().is_err(), "pending is not a booking status");
    }

    #[tokio::test]
    async fn test_filter_forwards_predicates_and_page() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_filter_bookings()
            .once()
            .withf(|filter, page| {
                filter.predicates()
                    == [BookingPredicate::CheckIn(Comparison::Gte, date(2026, 3, 1))]
                    && page.page() == 1
                    && page.per_page() == 20
            })
            .return_once(|_, page| Ok(Paginated::new(vec![], 0, page)));

        let res = TestClient::get(
            "http://example.com/booking/filter?check_in_from=2026-03-01&per_page=20",
        )
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_filter_without_conditions_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_filter_bookings()
            .once()
            .return_once(|_, _| {
                Err(BookingsServiceError::InvalidInput(
                    "at least one filter is required".to_string(),
                ))
            });

        let res = TestClient::get("http://example.com/booking/filter")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_filter_malformed_date_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_filter_bookings().never();

        let res = TestClient::get("http://example.com/booking/filter?check_out_to=soon")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

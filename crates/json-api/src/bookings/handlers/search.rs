//! Search Bookings Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    bookings::{errors::into_status_error, handlers::index::page_from, models::BookingsPageResponse},
    extensions::*,
    state::State,
};

/// Search Bookings Handler
///
/// Matches the term against booking ids, statuses and dates, guest names and
/// emails, and room numbers. Near misses are found by trigram similarity.
#[endpoint(
    tags("bookings"),
    summary = "Search Bookings",
    responses(
        (status_code = StatusCode::OK, description = "Matching bookings, best first"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or blank search term"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, true>,
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<BookingsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_from(page.into_inner(), per_page.into_inner())?;

    let bookings = state
        .app
        .bookings
        .search_bookings(q.into_inner(), page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(bookings.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use roomkeeper_app::domain::{
        bookings::{
            BookingsServiceError, MockBookingsService, filters::Paginated,
            records::BookingUuid,
        },
        rooms::records::RoomUuid,
    };

    use crate::test_helpers::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(bookings, Router::with_path("booking/search").get(handler))
    }

    #[tokio::test]
    async fn test_search_forwards_term_and_page() -> TestResult {
        let uuid = BookingUuid::new();
        let items = vec![make_booking(uuid, RoomUuid::new())?];

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_search_bookings()
            .once()
            .withf(|term, page| {
                term == "ada@example.com" && page.page() == 2 && page.per_page() == 5
            })
            .return_once(move |_, page| Ok(Paginated::new(items, 6, page)));

        let response: BookingsPageResponse = TestClient::get(
            "http://example.com/booking/search?q=ada%40example.com&page=2&per_page=5",
        )
        .send(&make_service(bookings))
        .await
        .take_json()
        .await?;

        let uuids: Vec<_> = response.items.iter().map(|b| b.uuid).collect();

        assert_eq!(uuids, vec![uuid.into_uuid()]);
        assert_eq!(response.total, 6);
        assert_eq!(response.total_pages, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_search_without_term_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_search_bookings().never();

        let res = TestClient::get("http://example.com/booking/search")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_search_blank_term_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_search_bookings()
            .once()
            .return_once(|_, _| {
                Err(BookingsServiceError::InvalidInput(
                    "search term must not be empty".to_string(),
                ))
            });

        let res = TestClient::get("http://example.com/booking/search?q=%20%20")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

//! Booking Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use roomkeeper_app::domain::bookings::filters::Page;

use crate::{
    bookings::{errors::into_status_error, models::BookingsPageResponse},
    extensions::*,
    state::State,
};

/// Resolve optional paging parameters, defaulting to the first page of ten.
pub(crate) fn page_from(
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<Page, StatusError> {
    let default = Page::default();

    Page::new(
        page.unwrap_or(default.page()),
        per_page.unwrap_or(default.per_page()),
    )
    .or_400("invalid pagination")
}

/// Booking Index Handler
///
/// Returns bookings newest first, one page at a time.
#[endpoint(tags("bookings"), summary = "List Bookings")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<BookingsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_from(page.into_inner(), per_page.into_inner())?;

    let bookings = state
        .app
        .bookings
        .list_bookings(page)
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
            MockBookingsService,
            filters::Paginated,
            records::BookingUuid,
        },
        rooms::records::RoomUuid,
    };

    use crate::test_helpers::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(bookings, Router::with_path("booking/list").get(handler))
    }

    #[tokio::test]
    async fn test_index_defaults_to_first_page() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .withf(|page| page.page() == 1 && page.per_page() == 10)
            .return_once(|page| Ok(Paginated::new(vec![], 0, page)));

        let response: BookingsPageResponse = TestClient::get("http://example.com/booking/list")
            .send(&make_service(bookings))
            .await
            .take_json()
            .await?;

        assert!(response.items.is_empty());
        assert_eq!(response.total_pages, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_requested_page() -> TestResult {
        let first = BookingUuid::new();
        let second = BookingUuid::new();
        let room = RoomUuid::new();

        let items = vec![make_booking(second, room)?, make_booking(first, room)?];

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .withf(|page| page.page() == 2 && page.per_page() == 2)
            .return_once(move |page| Ok(Paginated::new(items, 5, page)));

        let response: BookingsPageResponse =
            TestClient::get("http://example.com/booking/list?page=2&per_page=2")
                .send(&make_service(bookings))
                .await
                .take_json()
                .await?;

        let uuids: Vec<_> = response.items.iter().map(|b| b.uuid).collect();

        assert_eq!(uuids, vec![second.into_uuid(), first.into_uuid()]);
        assert_eq!(response.total, 5);
        assert_eq!(response.page, 2);
        assert_eq!(response.total_pages, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_oversized_page_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_list_bookings().never();

        let res = TestClient::get("http://example.com/booking/list?per_page=101")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

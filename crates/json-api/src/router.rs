//! App Router

use salvo::Router;

use crate::{bookings, identity, rooms};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(identity::handler)
        .push(
            Router::with_path("booking")
                .push(Router::with_path("create").post(bookings::create::handler))
                .push(Router::with_path("cancel").post(bookings::cancel::handler))
                .push(Router::with_path("reschedule").post(bookings::reschedule::handler))
                .push(
                    Router::with_path("checkAvailability")
                        .post(bookings::check_availability::handler),
                )
                .push(Router::with_path("list").get(bookings::index::handler))
                .push(Router::with_path("filter").get(bookings::filter::handler))
                .push(Router::with_path("search").get(bookings::search::handler))
                .push(Router::with_path("{booking}").get(bookings::get::handler)),
        )
        .push(
            Router::with_path("room")
                .push(Router::with_path("availableRooms").get(rooms::available::handler))
                .push(Router::with_path("filter").get(rooms::filter::handler))
                .push(
                    Router::with_path("{room}")
                        .get(rooms::get::handler)
                        .push(Router::with_path("status").put(rooms::status::handler)),
                ),
        )
}

//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::date, tz::TimeZone};
use roomkeeper::{
    status::{BookingStatus, RoomStatus},
    stay::{Stay, StayError},
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use roomkeeper_app::{
    context::AppContext,
    domain::{
        bookings::{
            MockBookingsService,
            records::{BookingRecord, BookingUuid, GuestUuid},
        },
        maintenance::MockMaintenanceService,
        rooms::{
            MockRoomsService,
            records::{RoomRecord, RoomUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_GUEST_UUID: GuestUuid = GuestUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_guest(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_guest_uuid(TEST_GUEST_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_bookings_mock() -> MockBookingsService {
    let mut bookings = MockBookingsService::new();

    bookings.expect_create_booking().never();
    bookings.expect_cancel_booking().never();
    bookings.expect_reschedule_booking().never();
    bookings.expect_get_booking().never();
    bookings.expect_list_bookings().never();
    bookings.expect_filter_bookings().never();

    bookings
}

fn strict_rooms_mock() -> MockRoomsService {
    let mut rooms = MockRoomsService::new();

    rooms.expect_get_room().never();
    rooms.expect_check_availability().never();
    rooms.expect_available_dates().never();
    rooms.expect_available_rooms().never();
    rooms.expect_filter_rooms().never();
    rooms.expect_update_room_status().never();

    rooms
}

fn state_with(bookings: MockBookingsService, rooms: MockRoomsService) -> Arc<State> {
    let app = AppContext {
        rooms: Arc::new(rooms),
        bookings: Arc::new(bookings),
        maintenance: Arc::new(MockMaintenanceService::new()),
    };

    State::from_app_context(app, TimeZone::UTC)
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_guest)
            .push(route),
    )
}

pub(crate) fn bookings_service(bookings: MockBookingsService, route: Router) -> Service {
    service(state_with(bookings, strict_rooms_mock()), route)
}

pub(crate) fn rooms_service(rooms: MockRoomsService, route: Router) -> Service {
    service(state_with(strict_bookings_mock(), rooms), route)
}

/// A confirmed three-night booking from 2026-03-01.
pub(crate) fn make_booking(uuid: BookingUuid, room: RoomUuid) -> Result<BookingRecord, StayError> {
    Ok(BookingRecord {
        uuid,
        guest_uuid: TEST_GUEST_UUID,
        room_uuid: room,
        stay: Stay::new(date(2026, 3, 1), date(2026, 3, 4))?,
        total_amount: 3000,
        status: BookingStatus::Confirmed,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    })
}

pub(crate) fn make_room(uuid: RoomUuid, room_number: u32) -> RoomRecord {
    RoomRecord {
        uuid,
        room_number,
        status: RoomStatus::Available,
        floor_uuid: Uuid::nil().into(),
        floor_number: 1,
        room_type_uuid: Uuid::nil().into(),
        room_type_name: "Double".to_string(),
        base_price: 1000,
        room_size: 25,
        max_adults: 2,
        max_children: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use roomkeeper_app::domain::bookings::records::GuestUuid;

const GUEST_UUID_DEPOT_KEY: &str = "guest_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_guest_uuid(&mut self, guest: GuestUuid);

    fn guest_uuid_or_401(&self) -> Result<GuestUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_guest_uuid(&mut self, guest: GuestUuid) {
        self.insert(GUEST_UUID_DEPOT_KEY, guest);
    }

    fn guest_uuid_or_401(&self) -> Result<GuestUuid, StatusError> {
        self.get::<GuestUuid>(GUEST_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Missing caller identity"))
    }
}

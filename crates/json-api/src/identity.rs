//! Caller identity middleware.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user's id in the `x-user-id` header.

use salvo::prelude::*;

use roomkeeper_app::domain::bookings::records::GuestUuid;

use crate::extensions::*;

pub(crate) const USER_ID_HEADER: &str = "x-user-id";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(guest) = extract_guest_uuid(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid x-user-id header"));
        ctrl.skip_rest();

        return;
    };

    depot.insert_guest_uuid(guest);

    ctrl.call_next(req, depot, res).await;
}

fn extract_guest_uuid(req: &Request) -> Option<GuestUuid> {
    let value = req.headers().get(USER_ID_HEADER)?.to_str().ok()?.trim();

    value.parse().ok()
}

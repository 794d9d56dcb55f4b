//! Reschedule Booking Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomkeeper::policies::Settlement;
use roomkeeper_app::domain::bookings::data::RescheduleOutcome;

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse, observe},
    extensions::*,
    params::parse_stay,
    state::State,
};

/// Reschedule Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RescheduleBookingRequest {
    /// Booking to move
    pub booking: Uuid,

    /// New first night, `YYYY-MM-DD`
    pub check_in: String,

    /// New departure day, `YYYY-MM-DD`
    pub check_out: String,
}

/// How the price difference was settled
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum SettlementResponse {
    /// The guest was charged the difference
    TopUp {
        /// Amount charged
        amount: u64,
    },

    /// The guest is refunded the difference less the penalty
    Refund {
        /// Full price difference
        amount: u64,

        /// Amount returned
        refund_amount: u64,

        /// Penalty retained
        deduction: u64,
    },

    /// Nothing changed hands
    Even,
}

impl From<Settlement> for SettlementResponse {
    fn from(settlement: Settlement) -> Self {
        match settlement {
            Settlement::TopUp { amount } => SettlementResponse::TopUp { amount },
            Settlement::Refund {
                amount,
                refund_amount,
                deduction,
            } => SettlementResponse::Refund {
                amount,
                refund_amount,
                deduction,
            },
            Settlement::Even => SettlementResponse::Even,
        }
    }
}

/// Reschedule Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub(crate) enum RescheduleResponse {
    /// The booking moved to the new dates
    Rescheduled {
        /// The booking after the move
        booking: BookingResponse,

        /// Amount paid before the move
        paid_amount: u64,

        /// Room price for the new dates
        new_total_amount: u64,

        /// Price difference settlement
        settlement: SettlementResponse,
    },

    /// The room is taken for the new dates; nothing changed
    Unavailable {
        /// Explanation for the guest
        message: String,

        /// Rooms of a compatible capacity free for the new dates
        available_rooms: Vec<Uuid>,
    },
}

impl From<RescheduleOutcome> for RescheduleResponse {
    fn from(outcome: RescheduleOutcome) -> Self {
        match outcome {
            RescheduleOutcome::Rescheduled(rescheduled) => RescheduleResponse::Rescheduled {
                booking: rescheduled.booking.into(),
                paid_amount: rescheduled.paid_amount,
                new_total_amount: rescheduled.new_total_amount,
                settlement: rescheduled.settlement.into(),
            },
            RescheduleOutcome::Unavailable { available_rooms } => {
                RescheduleResponse::Unavailable {
                    message: "Room is not available for the selected dates".to_string(),
                    available_rooms: available_rooms.into_iter().map(Into::into).collect(),
                }
            }
        }
    }
}

/// Reschedule Booking Handler
///
/// Moves a confirmed booking to new dates on the same room. A booking can be
/// rescheduled once, up to three days before check-in.
#[endpoint(
    tags("bookings"),
    summary = "Reschedule Booking",
    responses(
        (status_code = StatusCode::OK, description = "Rescheduled, or alternatives when the room is taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid dates, too late or already rescheduled"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RescheduleBookingRequest>,
    depot: &mut Depot,
) -> Result<Json<RescheduleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let stay = parse_stay(&request.check_in, &request.check_out)?;

    let result = state
        .app
        .bookings
        .reschedule_booking(request.booking.into(), stay, state.today())
        .await;

    let outcome = observe("reschedule", result).map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}

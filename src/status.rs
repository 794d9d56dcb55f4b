//! Statuses
//!
//! Closed status enumerations persisted as lower-case strings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a persisted status string is not a known variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} status `{value}`")]
pub struct UnknownStatus {
    /// Which status family was being parsed.
    pub kind: &'static str,

    /// The offending value.
    pub value: String,
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Storage representation.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownStatus {
                        kind: $kind,
                        value: value.to_owned(),
                    }),
                }
            }
        }
    };
}

status_enum! {
    /// Lifecycle state of a booking.
    BookingStatus, "booking" {
        /// Active booking holding its room.
        Confirmed => "confirmed",
        /// Cancelled by the guest. Terminal.
        Cancelled => "cancelled",
        /// Stay finished. Terminal.
        Completed => "completed",
    }
}

status_enum! {
    /// State of a payment ledger row.
    PaymentStatus, "payment" {
        /// Awaiting settlement.
        Pending => "pending",
        /// Settled charge.
        Paid => "paid",
        /// Partially settled charge.
        PartiallyPaid => "partially_paid",
        /// Money returned to the guest.
        Refunded => "refunded",
        /// Charge failed.
        Failed => "failed",
        /// Charge voided.
        Cancelled => "cancelled",
    }
}

status_enum! {
    /// Processing state of a refund.
    RefundStatus, "refund" {
        /// Accepted and awaiting processing.
        Approved => "approved",
        /// Paid out.
        Completed => "completed",
        /// Declined.
        Rejected => "rejected",
    }
}

status_enum! {
    /// Operational state of a physical room.
    RoomStatus, "room" {
        /// Ready for guests.
        Available => "available",
        /// Guests in residence.
        Occupied => "occupied",
        /// Out of service.
        Maintenance => "maintenance",
        /// Awaiting housekeeping.
        Cleaning => "cleaning",
    }
}

impl BookingStatus {
    /// Whether the booking can no longer change status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// Whether moving from `self` to `next` is a legal lifecycle transition.
    pub const fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (
                BookingStatus::Confirmed,
                BookingStatus::Cancelled | BookingStatus::Completed
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn statuses_round_trip_through_storage_strings() -> TestResult {
        for status in BookingStatus::ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>()?, *status);
        }

        for status in PaymentStatus::ALL {
            assert_eq!(status.as_str().parse::<PaymentStatus>()?, *status);
        }

        for status in RefundStatus::ALL {
            assert_eq!(status.as_str().parse::<RefundStatus>()?, *status);
        }

        for status in RoomStatus::ALL {
            assert_eq!(status.as_str().parse::<RoomStatus>()?, *status);
        }

        Ok(())
    }

    #[test]
    fn unknown_status_names_the_family() {
        let error = "CONFIRMED".parse::<BookingStatus>();

        assert_eq!(
            error,
            Err(UnknownStatus {
                kind: "booking",
                value: "CONFIRMED".to_string(),
            })
        );
    }

    #[test]
    fn only_confirmed_bookings_transition() {
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Confirmed));

        for terminal in [BookingStatus::Cancelled, BookingStatus::Completed] {
            assert!(terminal.is_terminal());

            for next in BookingStatus::ALL {
                assert!(!terminal.can_transition_to(*next));
            }
        }
    }

    #[test]
    fn serde_uses_storage_strings() -> TestResult {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::PartiallyPaid)?,
            "\"partially_paid\""
        );

        Ok(())
    }
}

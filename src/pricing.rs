//! Pricing
//!
//! Amounts are whole minor units; the engine is currency agnostic.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::stay::Stay;

/// Highest nightly base price a room type may carry.
pub const MAX_BASE_PRICE: u64 = 1_000_000;

/// Errors raised while pricing a booking.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    /// Nightly base price is zero or above [`MAX_BASE_PRICE`].
    #[error("base price {0} is outside 1..=1000000")]
    BasePriceOutOfRange(u64),

    /// An intermediate amount does not fit in a `u64`.
    #[error("amount overflowed while pricing")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,
}

/// A priced addon on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonLine {
    /// Unit price of the addon.
    pub unit_price: u64,

    /// Number of units ordered.
    pub quantity: u32,
}

impl AddonLine {
    /// Line total.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in a `u64`.
    pub fn amount(&self) -> Result<u64, PricingError> {
        self.unit_price
            .checked_mul(u64::from(self.quantity))
            .ok_or(PricingError::Overflow)
    }
}

/// Price breakdown of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Nights multiplied by the nightly base price.
    pub room_amount: u64,

    /// Sum of every addon line.
    pub addon_amount: u64,

    /// `room_amount + addon_amount`.
    pub total: u64,
}

/// Price of the room alone for a stay.
///
/// # Errors
///
/// Returns [`PricingError::BasePriceOutOfRange`] for a zero or oversized base
/// price, and [`PricingError::Overflow`] if the total does not fit in a `u64`.
pub fn room_amount(stay: &Stay, base_price: u64) -> Result<u64, PricingError> {
    if base_price == 0 || base_price > MAX_BASE_PRICE {
        return Err(PricingError::BasePriceOutOfRange(base_price));
    }

    base_price
        .checked_mul(u64::from(stay.nights()))
        .ok_or(PricingError::Overflow)
}

/// Price a stay together with its addons.
///
/// # Errors
///
/// Returns [`PricingError::BasePriceOutOfRange`] for an invalid base price, and
/// [`PricingError::Overflow`] if any amount does not fit in a `u64`.
pub fn quote(stay: &Stay, base_price: u64, addons: &[AddonLine]) -> Result<Quote, PricingError> {
    let room_amount = room_amount(stay, base_price)?;

    let addon_amount = addons
        .iter()
        .map(AddonLine::amount)
        .collect::<Result<SmallVec<[u64; 4]>, _>>()?
        .into_iter()
        .try_fold(0_u64, u64::checked_add)
        .ok_or(PricingError::Overflow)?;

    let total = room_amount
        .checked_add(addon_amount)
        .ok_or(PricingError::Overflow)?;

    Ok(Quote {
        room_amount,
        addon_amount,
        total,
    })
}

/// Apply a percentage to an amount in minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the result cannot be represented.
pub fn percent_of(percent: &Percentage, amount: u64) -> Result<u64, PricingError> {
    let amount = Decimal::from_u64(amount).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(amount)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::PercentConversion)
}

//! Cancellation and reschedule policies.

use decimal_percentage::Percentage;
use jiff::{ToSpan, civil::Date};
use rust_decimal::Decimal;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use crate::{
    pricing::{PricingError, percent_of},
    stay::Stay,
};

/// Refund bracket keyed by days until check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundTier {
    /// Fewer than three days before check-in.
    LastMinute,

    /// Three to six days before check-in.
    Short,

    /// Seven or more days before check-in.
    Early,
}

impl RefundTier {
    /// Short name used in logs and responses.
    pub const fn as_str(self) -> &'static str {
        match self {
            RefundTier::LastMinute => "last_minute",
            RefundTier::Short => "short",
            RefundTier::Early => "early",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TierRule {
    tier: RefundTier,
    min_days: i64,
    refund: Percentage,
}

/// Tiered refund schedule for cancellations.
#[derive(Debug, Clone)]
pub struct CancellationPolicy {
    // Sorted by `min_days` descending; the last rule catches everything below.
    rules: SmallVec<[TierRule; 3]>,
}

/// Result of applying a [`CancellationPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationQuote {
    /// Bracket the cancellation fell into.
    pub tier: RefundTier,

    /// Days from the cancellation date until check-in.
    pub days_until_check_in: i64,

    /// Amount originally paid.
    pub total_amount: u64,

    /// Amount returned to the guest.
    pub refund_amount: u64,
}

impl CancellationQuote {
    /// Guest facing summary of the refund.
    pub fn message(&self) -> String {
        match self.tier {
            RefundTier::Early => format!(
                "Full refund of {} will be processed in 2 days.",
                self.refund_amount
            ),
            RefundTier::Short | RefundTier::LastMinute => format!(
                "Refund of {} will be processed in 2 days.",
                self.refund_amount
            ),
        }
    }
}

impl CancellationPolicy {
    /// The house policy: 80% under three days, 50% for three to six days, full refund from seven.
    pub fn standard() -> Self {
        Self {
            rules: smallvec![
                TierRule {
                    tier: RefundTier::Early,
                    min_days: 7,
                    refund: Percentage::from(Decimal::ONE),
                },
                TierRule {
                    tier: RefundTier::Short,
                    min_days: 3,
                    refund: Percentage::from(Decimal::new(50, 2)),
                },
                TierRule {
                    tier: RefundTier::LastMinute,
                    min_days: i64::MIN,
                    refund: Percentage::from(Decimal::new(80, 2)),
                },
            ],
        }
    }

    /// Work out the refund for cancelling `stay` on `today`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the refund cannot be represented.
    pub fn quote(
        &self,
        stay: &Stay,
        total_amount: u64,
        today: Date,
    ) -> Result<CancellationQuote, PricingError> {
        let days_until_check_in = stay.days_until_check_in(today);

        let rule = self
            .rules
            .iter()
            .find(|rule| days_until_check_in >= rule.min_days)
            .ok_or(PricingError::PercentConversion)?;

        Ok(CancellationQuote {
            tier: rule.tier,
            days_until_check_in,
            total_amount,
            refund_amount: percent_of(&rule.refund, total_amount)?,
        })
    }
}

/// Errors raised by the reschedule policy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RescheduleError {
    /// The request falls inside the cutoff window before check-in.
    #[error("too late to reschedule: the last day was {last_day}")]
    TooLate {
        /// Last day on which rescheduling was allowed.
        last_day: Date,
    },

    /// Settlement arithmetic failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// How the price difference of a reschedule is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The guest owes `amount` more.
    TopUp {
        /// Difference to charge.
        amount: u64,
    },

    /// The guest is owed money, less the reschedule penalty.
    Refund {
        /// Full price difference.
        amount: u64,

        /// Portion returned to the guest.
        refund_amount: u64,

        /// Portion retained as penalty.
        deduction: u64,
    },

    /// Prices match; nothing changes hands.
    Even,
}

impl Settlement {
    /// Signed difference `new_total - paid`.
    pub fn difference(&self) -> i128 {
        match *self {
            Settlement::TopUp { amount } => i128::from(amount),
            Settlement::Refund { amount, .. } => -i128::from(amount),
            Settlement::Even => 0,
        }
    }
}

/// Rules governing when and how a booking may be moved.
#[derive(Debug, Clone, Copy)]
pub struct ReschedulePolicy {
    cutoff_days: i64,
    refund: Percentage,
}

impl ReschedulePolicy {
    /// The house policy: no later than three days before check-in, 20% penalty on refunds.
    pub fn standard() -> Self {
        Self {
            cutoff_days: 3,
            refund: Percentage::from(Decimal::new(80, 2)),
        }
    }

    /// Number of days before check-in after which rescheduling is refused.
    pub const fn cutoff_days(&self) -> i64 {
        self.cutoff_days
    }

    /// Ensure `today` is on or before `check_in - cutoff_days`.
    ///
    /// # Errors
    ///
    /// Returns [`RescheduleError::TooLate`] inside the cutoff window.
    pub fn ensure_not_too_late(&self, check_in: Date, today: Date) -> Result<(), RescheduleError> {
        let last_day = check_in.saturating_sub(self.cutoff_days.days());

        if today > last_day {
            return Err(RescheduleError::TooLate { last_day });
        }

        Ok(())
    }

    /// Settle the difference between what was paid and the new price.
    ///
    /// # Errors
    ///
    /// Returns [`RescheduleError::Pricing`] if the refund cannot be represented.
    pub fn settle(&self, paid: u64, new_total: u64) -> Result<Settlement, RescheduleError> {
        if new_total > paid {
            return Ok(Settlement::TopUp {
                amount: new_total - paid,
            });
        }

        if new_total == paid {
            return Ok(Settlement::Even);
        }

        let amount = paid - new_total;
        let refund_amount = percent_of(&self.refund, amount)?;

        Ok(Settlement::Refund {
            amount,
            refund_amount,
            deduction: amount - refund_amount,
        })
    }
}

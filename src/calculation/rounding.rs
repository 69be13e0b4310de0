//! Rounding policy for reported amounts.
//!
//! Intermediate figures keep full decimal precision; only values that are
//! reported in a [`PayrollResult`](crate::models::PayrollResult) are rounded,
//! commercially, to cents.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to cents, half away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_to_cents(Decimal::new(1369335, 3)), Decimal::new(136934, 2));
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

//! Rounding helpers shared by the pricing code.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to a whole currency unit, with halves rounded away from zero.
///
/// Totals are never negative, so this is plain half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use giftbox_core::pricing::common::round_to_whole;
///
/// assert_eq!(round_to_whole(dec!(62.49)), dec!(62));
/// assert_eq!(round_to_whole(dec!(62.5)), dec!(63));
/// assert_eq!(round_to_whole(dec!(63.0)), dec!(63));
/// ```
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Share of the wizard completed once `step` (zero-based) is reached, as a
/// whole percentage.
///
/// # Examples
///
/// ```
/// use giftbox_core::pricing::common::progress_percent;
///
/// assert_eq!(progress_percent(0, 9), 11);
/// assert_eq!(progress_percent(8, 9), 100);
/// ```
pub fn progress_percent(
    step: usize,
    total_steps: usize,
) -> u32 {
    if total_steps == 0 {
        return 100;
    }
    let reached = Decimal::from(step as u64 + 1);
    let ratio = reached * Decimal::ONE_HUNDRED / Decimal::from(total_steps as u64);
    round_to_whole(ratio).to_u32().unwrap_or(100)
}

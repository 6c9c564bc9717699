//! Strike ladder construction

use rust_decimal::{Decimal, RoundingStrategy};

/// Spot rounded to the nearest ladder increment, halves rounding up
pub fn centre_strike(spot: Decimal, increment: Decimal) -> Decimal {
    (spot / increment).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * increment
}

/// Up to `2 * range + 1` strikes centred on the rounded spot, ascending
///
/// Strikes at or below zero are dropped, so a spot near zero yields a
/// shorter ladder that still starts one increment above zero.
pub fn build_ladder(spot: Decimal, increment: Decimal, range: u32) -> Vec<Decimal> {
    let centre = centre_strike(spot, increment);
    let range = i64::from(range);
    (-range..=range)
        .map(|i| centre + Decimal::from(i) * increment)
        .filter(|strike| *strike > Decimal::ZERO)
        .collect()
}

/// `steps` strikes continuing upward from `top`
pub fn extend_above(top: Decimal, increment: Decimal, steps: u32) -> Vec<Decimal> {
    (1..=steps)
        .map(|i| top + Decimal::from(i) * increment)
        .collect()
}

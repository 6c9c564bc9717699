//! Direction- and proximity-aware profit weighting

use crate::model::MarketDirection;
use crate::signal::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const AT_THE_MONEY: f64 = 1.2;
const AGAINST_STRIKE: f64 = 0.6;
const AGAINST_DIRECTION: f64 = 0.4;
const PROXIMITY_WEIGHT: f64 = 0.5;

/// How profit potential is weighted for a strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitWeighting {
    /// Core ladder: reward the dominant side near spot
    Proximity,
    /// Extension strikes: flat 0.6 YES / 0.4 NO
    Flat,
}

/// Multiplier applied to edge to get profit potential
///
/// When rising, YES below spot earns a bonus that fades over
/// `proximity_window`, at-the-money YES gets 1.2, YES above spot 0.6 and every
/// NO 0.4. Falling mirrors this with the sides swapped.
pub fn profit_multiplier(
    side: Side,
    strike: Decimal,
    spot: Decimal,
    direction: MarketDirection,
    weighting: ProfitWeighting,
    proximity_window: Decimal,
) -> f64 {
    if weighting == ProfitWeighting::Flat {
        return match side {
            Side::Yes => AGAINST_STRIKE,
            Side::No => AGAINST_DIRECTION,
        };
    }

    let favoured = match direction {
        MarketDirection::Rising => Side::Yes,
        MarketDirection::Falling => Side::No,
    };
    if side != favoured {
        return AGAINST_DIRECTION;
    }

    // Distance on the profitable side of spot; negative means the wrong side
    let distance = match direction {
        MarketDirection::Rising => spot - strike,
        MarketDirection::Falling => strike - spot,
    };

    if distance > Decimal::ZERO {
        let window: f64 = proximity_window.try_into().unwrap_or(500.0);
        let distance: f64 = distance.try_into().unwrap_or(0.0);
        let bonus = ((window - distance) / window).max(0.0);
        1.0 + bonus * PROXIMITY_WEIGHT
    } else if distance.is_zero() {
        AT_THE_MONEY
    } else {
        AGAINST_STRIKE
    }
}

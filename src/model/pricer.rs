//! Time-decay binary option pricer
//!
//! Maps (spot, strike, minutes to expiry) to a YES price in cents. Strikes at
//! or below spot approach 99¢; strikes above spot decay exponentially with a
//! steepness that depends on how close expiry is. Every threshold below is a
//! calibration constant.

use super::overrides::OverrideStore;
use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Assumed hourly BTC volatility feeding the flattening boost
const HOURLY_VOLATILITY: f64 = 0.006;

/// Hook for a momentum adjustment; contributes nothing today
const MOMENTUM_FACTOR: f64 = 0.0;

/// Priced YES/NO pair at one strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// YES price in [0.01, 0.99]
    pub yes: Decimal,
    /// Always 1 - yes
    pub no: Decimal,
    /// Whether the price came from a manual override
    pub overridden: bool,
}

impl Quote {
    fn from_yes(yes: Decimal, overridden: bool) -> Self {
        Self {
            yes,
            no: Decimal::ONE - yes,
            overridden,
        }
    }
}

/// Binary option pricer with a configurable base decay rate
#[derive(Debug, Clone)]
pub struct DecayPricer {
    base_decay_rate: Decimal,
}

impl DecayPricer {
    pub fn new(base_decay_rate: Decimal) -> Self {
        Self { base_decay_rate }
    }

    pub fn base_decay_rate(&self) -> Decimal {
        self.base_decay_rate
    }

    /// Price the YES/NO pair at `strike`, preferring a manual override
    pub fn quote(
        &self,
        spot: Decimal,
        strike: Decimal,
        minutes_to_expiry: f64,
        overrides: &OverrideStore,
    ) -> Result<Quote> {
        if spot <= Decimal::ZERO || strike <= Decimal::ZERO {
            return Err(EngineError::InvalidInput(format!(
                "spot and strike must be positive, got spot={} strike={}",
                spot, strike
            )));
        }
        if minutes_to_expiry.is_nan() || minutes_to_expiry <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "minutes to expiry must be positive, got {}",
                minutes_to_expiry
            )));
        }

        if let Some(yes) = overrides.yes_price(strike, self.base_decay_rate) {
            return Ok(Quote::from_yes(yes, true));
        }

        let spot_f: f64 = spot.try_into().unwrap_or(0.0);
        let strike_f: f64 = strike.try_into().unwrap_or(0.0);
        let base_rate: f64 = self.base_decay_rate.try_into().unwrap_or(5.0);

        let prob = if strike <= spot {
            let percent_below = (spot_f - strike_f) / spot_f * 100.0;
            in_the_money_probability(percent_below, base_rate)
        } else {
            let percent_above = (strike_f - spot_f) / spot_f * 100.0;
            out_of_the_money_probability(percent_above, minutes_to_expiry, base_rate)
        };

        Ok(Quote::from_yes(round_to_cent(prob), false))
    }
}

impl Default for DecayPricer {
    fn default() -> Self {
        Self::new(Decimal::new(5, 0))
    }
}

/// Strike at or below spot: exponential approach from 0.95 toward 0.99
pub fn in_the_money_probability(percent_below: f64, base_decay_rate: f64) -> f64 {
    let steepness = base_decay_rate * 0.1;
    let prob = 0.95 + 0.04 * (1.0 - (-percent_below / (0.3 / steepness)).exp());
    prob.min(0.99)
}

/// Strike above spot: tiered exponential decay plus a volatility boost
pub fn out_of_the_money_probability(percent_above: f64, minutes: f64, base_decay_rate: f64) -> f64 {
    let rate = time_adjusted_decay_rate(minutes, base_decay_rate);
    let hours = minutes / 60.0;
    let factor = time_factor(hours);

    let base_prob = if minutes <= 30.0 {
        if percent_above <= 0.1 {
            0.5 * (-rate * percent_above * 0.5).exp()
        } else if percent_above <= 0.3 {
            0.4 * (-rate * percent_above).exp()
        } else {
            0.2 * (-rate * percent_above * 1.5).exp()
        }
    } else {
        0.5 * (-rate * percent_above * factor).exp()
    };

    let volatility_boost = HOURLY_VOLATILITY * hours.sqrt() * 10.0;
    let prob = base_prob + volatility_boost + MOMENTUM_FACTOR;

    clamp_for_expiry(prob, minutes, percent_above)
}

/// Decay steepness schedule keyed on minutes remaining
pub fn time_adjusted_decay_rate(minutes: f64, base_decay_rate: f64) -> f64 {
    if minutes <= 15.0 {
        5.0
    } else if minutes <= 30.0 {
        6.0
    } else if minutes <= 50.0 {
        8.0
    } else if minutes <= 60.0 {
        15.0
    } else {
        let hours = minutes / 60.0;
        if hours <= 4.0 {
            let transition = ((4.0 - hours) / 3.0).clamp(0.0, 1.0);
            6.0 * (1.0 - transition) + 2.0 * transition
        } else {
            base_decay_rate
        }
    }
}

/// Less time left means a steeper exponent
pub fn time_factor(hours: f64) -> f64 {
    (1.0 / (hours + 0.1).sqrt()).clamp(0.2, 2.0)
}

/// Price bounds per expiry tier
fn clamp_for_expiry(prob: f64, minutes: f64, percent_above: f64) -> f64 {
    let (lo, hi) = if minutes <= 5.0 {
        if percent_above <= 0.05 {
            (0.4, 0.95)
        } else {
            (0.01, 0.6)
        }
    } else if minutes <= 15.0 {
        (0.05, 0.95)
    } else if minutes <= 30.0 {
        (0.10, 0.90)
    } else if minutes <= 60.0 {
        (0.15, 0.85)
    } else {
        (0.01, 0.85)
    };
    prob.clamp(lo, hi)
}

/// Round half up to whole cents
pub fn round_to_cent(prob: f64) -> Decimal {
    let cents = (prob * 100.0).round().clamp(1.0, 99.0) as i64;
    Decimal::new(cents, 2)
}

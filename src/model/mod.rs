//! Pricing and prediction module
//!
//! Market-side pricing of binary strike contracts and the two directional
//! predictors that feed the true-probability estimate.

mod overrides;
mod predictors;
mod pricer;

pub use overrides::{parse_cents, OverrideKey, OverrideStore, MAX_CENTS, MIN_CENTS};
pub use predictors::{feature_model, trend_model, ModelOutputs, MAX_SCORE, MIN_SCORE};
pub use pricer::{
    in_the_money_probability, out_of_the_money_probability, round_to_cent, time_adjusted_decay_rate,
    time_factor, DecayPricer, Quote,
};

use serde::{Deserialize, Serialize};

/// Overall predicted direction of spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketDirection {
    Rising,
    Falling,
}

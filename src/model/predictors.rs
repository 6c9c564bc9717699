//! Directional predictors
//!
//! Two fixed linear heuristics over recent prices and indicators. Each returns
//! a bullishness score in [30, 90]; the coefficients are calibration values.

use super::MarketDirection;
use crate::indicators::Indicators;
use crate::signal::patterns::{net_bias, Pattern};
use serde::{Deserialize, Serialize};

/// Lower bound of a predictor score
pub const MIN_SCORE: f64 = 30.0;
/// Upper bound of a predictor score
pub const MAX_SCORE: f64 = 90.0;

const BASE_SCORE: f64 = 50.0;
const TREND_LOOKBACK: usize = 5;
const TREND_SCALE: f64 = 50.0;
const TREND_CAP: f64 = 20.0;
const RSI_SCALE: f64 = 5.0;
const VOLUME_WEIGHT: f64 = 15.0;
const MACD_WEIGHT: f64 = 10.0;
const BOLLINGER_WEIGHT: f64 = 20.0;
const PATTERN_WEIGHT: f64 = 5.0;

/// Trend model: net move over the last five prices plus RSI lean
pub fn trend_model(prices: &[f64], indicators: &Indicators) -> f64 {
    let trend = if prices.len() >= TREND_LOOKBACK {
        prices[prices.len() - TREND_LOOKBACK..]
            .windows(2)
            .map(|w| w[1] - w[0])
            .sum::<f64>()
    } else {
        0.0
    };

    let trend_influence = (trend / TREND_SCALE).clamp(-TREND_CAP, TREND_CAP);
    let rsi_influence = (indicators.rsi - 50.0) / RSI_SCALE;

    (BASE_SCORE + trend_influence + rsi_influence).clamp(MIN_SCORE, MAX_SCORE)
}

/// Feature model: weighted indicator deviations plus pattern balance
pub fn feature_model(indicators: &Indicators, patterns: &[Pattern]) -> f64 {
    let score = BASE_SCORE
        + (indicators.volume - 1.0) * VOLUME_WEIGHT
        + indicators.macd * MACD_WEIGHT
        + (indicators.bollinger_position - 0.5) * BOLLINGER_WEIGHT
        + f64::from(net_bias(patterns)) * PATTERN_WEIGHT;

    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Both predictor scores for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelOutputs {
    pub trend: f64,
    pub feature: f64,
}

impl ModelOutputs {
    /// Run both predictors
    pub fn evaluate(prices: &[f64], indicators: &Indicators, patterns: &[Pattern]) -> Self {
        Self {
            trend: trend_model(prices, indicators),
            feature: feature_model(indicators, patterns),
        }
    }

    pub fn average(&self) -> f64 {
        (self.trend + self.feature) / 2.0
    }

    /// Rising when the average score is strictly above 50
    pub fn direction(&self) -> MarketDirection {
        if self.average() > BASE_SCORE {
            MarketDirection::Rising
        } else {
            MarketDirection::Falling
        }
    }

    /// 100 minus the gap between the two scores
    pub fn agreement(&self) -> f64 {
        100.0 - (self.trend - self.feature).abs()
    }
}

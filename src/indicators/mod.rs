//! Technical indicator module
//!
//! Recomputes RSI, MACD, Bollinger position and a volatility-based volume
//! proxy from the current price window. Nothing carries over between cycles
//! except the window itself.

pub mod calc;

use serde::{Deserialize, Serialize};

/// Indicator snapshot for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Relative strength index in [0, 100]
    pub rsi: f64,
    /// MACD line as a percentage of spot
    pub macd: f64,
    /// Spot position between the Bollinger bands in [0, 1]
    pub bollinger_position: f64,
    /// Volatility-derived activity proxy in [0.5, 2.0]
    pub volume: f64,
    /// Lower Bollinger band
    pub support_level: f64,
    /// Upper Bollinger band
    pub resistance_level: f64,
}

impl Indicators {
    /// Neutral readings anchored at `spot`
    pub fn neutral(spot: f64) -> Self {
        Self {
            rsi: 50.0,
            macd: 0.0,
            bollinger_position: 0.5,
            volume: 1.0,
            support_level: spot,
            resistance_level: spot,
        }
    }

    /// Compute every indicator from `prices` (oldest first) and the current spot
    ///
    /// Windows shorter than two points degrade to neutral momentum readings.
    pub fn compute(prices: &[f64], spot: f64) -> Self {
        let bands = calc::bollinger(prices, calc::BOLLINGER_PERIOD, spot);
        let bollinger_position = bands.position(spot).clamp(0.0, 1.0);

        if prices.len() < 2 {
            return Self {
                bollinger_position,
                support_level: bands.lower,
                resistance_level: bands.upper,
                ..Self::neutral(spot)
            };
        }

        let macd = if spot > 0.0 {
            calc::macd(prices) / spot * 100.0
        } else {
            0.0
        };

        Self {
            rsi: calc::rsi(prices, calc::RSI_PERIOD).clamp(0.0, 100.0),
            macd,
            bollinger_position,
            volume: calc::volume_proxy(prices, calc::VOLUME_PERIOD),
            support_level: bands.lower,
            resistance_level: bands.upper,
        }
    }
}

//! Pattern detection from indicator thresholds and short-term price shape

use crate::indicators::Indicators;
use serde::{Deserialize, Serialize};

/// Lookback used by the formation check
pub const FORMATION_LOOKBACK: usize = 10;

/// Directional lean of a detected pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternBias {
    Bullish,
    Bearish,
}

/// A named pattern detected this cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub bias: PatternBias,
}

impl Pattern {
    fn bullish(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bias: PatternBias::Bullish,
        }
    }

    fn bearish(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bias: PatternBias::Bearish,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.bias == PatternBias::Bullish
    }

    pub fn is_bearish(&self) -> bool {
        self.bias == PatternBias::Bearish
    }
}

/// Evaluate every rule against the current indicators and price window
///
/// Rules are independent; output follows evaluation order and each rule
/// contributes at most one pattern.
pub fn detect_patterns(indicators: &Indicators, prices: &[f64]) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    if indicators.rsi > 70.0 {
        patterns.push(Pattern::bearish("Overbought (RSI > 70)"));
    }
    if indicators.rsi < 30.0 {
        patterns.push(Pattern::bullish("Oversold (RSI < 30)"));
    }
    if indicators.macd > 0.5 {
        patterns.push(Pattern::bullish("MACD Bullish Crossover"));
    }
    if indicators.macd < -0.5 {
        patterns.push(Pattern::bearish("MACD Bearish Crossover"));
    }
    if indicators.bollinger_position > 0.8 {
        patterns.push(Pattern::bearish("Upper Bollinger Band"));
    }
    if indicators.bollinger_position < 0.2 {
        patterns.push(Pattern::bullish("Lower Bollinger Band"));
    }

    if prices.len() >= FORMATION_LOOKBACK {
        let recent = &prices[prices.len() - FORMATION_LOOKBACK..];
        let mean = recent.iter().sum::<f64>() / recent.len() as f64;
        if recent[recent.len() - 1] > mean {
            patterns.push(Pattern::bullish("Cup & Handle Forming"));
        }
    }

    patterns
}

/// Bullish minus bearish pattern count
pub fn net_bias(patterns: &[Pattern]) -> i32 {
    patterns
        .iter()
        .map(|p| match p.bias {
            PatternBias::Bullish => 1,
            PatternBias::Bearish => -1,
        })
        .sum()
}

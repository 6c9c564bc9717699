//! Windowed indicator calculations
//!
//! Every function takes the full price window, oldest first, and uses as much
//! of its nominal period as the window can supply.

/// RSI lookback
pub const RSI_PERIOD: usize = 14;
/// Fast EMA period for MACD
pub const MACD_FAST: usize = 12;
/// Slow EMA period for MACD
pub const MACD_SLOW: usize = 26;
/// Bollinger lookback
pub const BOLLINGER_PERIOD: usize = 20;
/// Return window for the volume proxy
pub const VOLUME_PERIOD: usize = 10;

/// Upper and lower Bollinger bands around the simple moving average
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Where `price` sits between the bands, 0.5 when the bands collapse
    pub fn position(&self, price: f64) -> f64 {
        if self.upper == self.lower {
            return 0.5;
        }
        (price - self.lower) / (self.upper - self.lower)
    }
}

/// Relative strength index over the last `min(period, n - 1)` deltas
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    let available = period.min(prices.len().saturating_sub(1));
    if available < 1 {
        return 50.0;
    }

    let start = prices.len() - available - 1;
    let (gains, losses) = prices[start..]
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses + change.abs())
            }
        });

    let avg_gain = gains / available as f64;
    let avg_loss = losses / available as f64;
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Exponential moving average seeded with the oldest price
pub fn ema(prices: &[f64], period: usize) -> f64 {
    let Some(&seed) = prices.first() else {
        return 0.0;
    };
    let used = period.min(prices.len()).max(1);
    let multiplier = 2.0 / (used as f64 + 1.0);

    prices[1..]
        .iter()
        .fold(seed, |ema, price| (price - ema) * multiplier + ema)
}

/// Raw MACD line: fast EMA minus slow EMA
pub fn macd(prices: &[f64]) -> f64 {
    let fast = MACD_FAST.min(prices.len());
    let slow = MACD_SLOW.min(prices.len());
    ema(prices, fast) - ema(prices, slow)
}

/// Bollinger bands at two population standard deviations
///
/// An empty window collapses all three bands onto `fallback`.
pub fn bollinger(prices: &[f64], period: usize, fallback: f64) -> BollingerBands {
    let used = period.min(prices.len());
    if used < 1 {
        return BollingerBands {
            upper: fallback,
            middle: fallback,
            lower: fallback,
        };
    }

    let recent = &prices[prices.len() - used..];
    let sma = recent.iter().sum::<f64>() / used as f64;
    let std_dev = population_std_dev(recent, sma);

    BollingerBands {
        upper: sma + 2.0 * std_dev,
        middle: sma,
        lower: sma - 2.0 * std_dev,
    }
}

/// Volatility of simple returns mapped onto a [0.5, 2.0] activity proxy
pub fn volume_proxy(prices: &[f64], period: usize) -> f64 {
    let used = period.min(prices.len().saturating_sub(1));
    if used < 1 {
        return 1.0;
    }

    let recent = &prices[prices.len() - used - 1..];
    let returns: Vec<f64> = recent.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
    if returns.is_empty() {
        return 1.0;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let volatility = population_std_dev(&returns, mean);
    (1.0 + volatility * 100.0).clamp(0.5, 2.0)
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

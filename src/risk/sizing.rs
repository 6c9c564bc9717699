//! Confidence-scaled position sizing
//!
//! Size = confidence% of half the bankroll, boosted by edge up to 1.5x and
//! rounded to whole dollars.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RiskConfig;

/// Edge (percentage points) that adds a full 1.0 to the size multiplier
const EDGE_SCALE: f64 = 50.0;

/// Sizes positions from confidence, edge and bankroll
#[derive(Debug, Clone)]
pub struct PositionSizer {
    /// Largest share of bankroll a single position may use (e.g., 0.5)
    pub max_bet_fraction: f64,
    /// Cap on the edge-driven multiplier (e.g., 1.5)
    pub max_edge_multiplier: f64,
}

impl PositionSizer {
    /// Create a new sizer
    pub fn new(max_bet_fraction: f64, max_edge_multiplier: f64) -> Self {
        Self {
            max_bet_fraction,
            max_edge_multiplier,
        }
    }

    /// Create from RiskConfig
    pub fn from_config(config: &RiskConfig) -> Self {
        Self::new(config.max_bet_fraction, config.max_edge_multiplier)
    }

    /// 1 + edge / 50, capped
    pub fn edge_multiplier(&self, edge: f64) -> f64 {
        (1.0 + edge / EDGE_SCALE).min(self.max_edge_multiplier)
    }

    /// Whole-dollar position size
    ///
    /// The scaling factor is computed in f64 and applied to the bankroll in
    /// Decimal, saturating at `Decimal::MAX`.
    pub fn size(&self, confidence: f64, edge: f64, bankroll: Decimal) -> Decimal {
        let factor = (confidence / 100.0) * self.max_bet_fraction * self.edge_multiplier(edge);
        let factor = Decimal::try_from(factor).unwrap_or(Decimal::ZERO);
        bankroll
            .checked_mul(factor)
            .unwrap_or(Decimal::MAX)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .max(Decimal::ZERO)
    }
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self::new(0.5, 1.5)
    }
}

/// Expected profit of a $1-payout contract position, rounded to cents
pub fn expected_value(true_prob: Decimal, market_price: Decimal, size: Decimal) -> Decimal {
    ((true_prob - market_price) * size).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sizer_default() {
        let sizer = PositionSizer::default();
        assert_eq!(sizer.max_bet_fraction, 0.5);
        assert_eq!(sizer.max_edge_multiplier, 1.5);
    }

    #[test]
    fn test_sizer_from_config() {
        let config = RiskConfig {
            initial_bankroll: dec!(100),
            max_bet_fraction: 0.25,
            max_edge_multiplier: 2.0,
        };
        let sizer = PositionSizer::from_config(&config);
        assert_eq!(sizer.max_bet_fraction, 0.25);
        assert_eq!(sizer.edge_multiplier(40.0), 1.8);
    }

    #[test]
    fn test_edge_multiplier_capped() {
        let sizer = PositionSizer::default();
        assert_eq!(sizer.edge_multiplier(0.0), 1.0);
        assert!((sizer.edge_multiplier(10.0) - 1.2).abs() < 1e-12);
        assert_eq!(sizer.edge_multiplier(25.0), 1.5);
        assert_eq!(sizer.edge_multiplier(80.0), 1.5);
    }

    #[test]
    fn test_size_example_100_bankroll() {
        let sizer = PositionSizer::default();
        // 80% of $50 at 1.2x = 48
        assert_eq!(sizer.size(80.0, 10.0, dec!(100)), dec!(48));
        // 61.2% of $50 at 1.0x = 30.6
        assert_eq!(sizer.size(61.2, 0.0, dec!(100)), dec!(31));
    }

    #[test]
    fn test_size_zero_bankroll() {
        let sizer = PositionSizer::default();
        assert_eq!(sizer.size(95.0, 30.0, dec!(0)), dec!(0));
    }

    #[test]
    fn test_size_large_bankroll_not_truncated() {
        let sizer = PositionSizer::default();
        // 50% of 1e22 at 1.0x, far beyond i64
        let size = sizer.size(100.0, 0.0, dec!(10000000000000000000000));
        assert_eq!(size, dec!(5000000000000000000000));
    }

    #[test]
    fn test_size_saturates_at_decimal_max() {
        let sizer = PositionSizer::new(1.0, 1.5);
        let size = sizer.size(95.0, 50.0, Decimal::MAX);
        assert_eq!(size, Decimal::MAX);
    }

    #[test]
    fn test_expected_value() {
        assert_eq!(expected_value(dec!(0.62), dec!(0.50), dec!(48)), dec!(5.76));
        assert_eq!(expected_value(dec!(0.40), dec!(0.45), dec!(10)), dec!(-0.50));
        assert_eq!(
            expected_value(dec!(0.123456), dec!(0.10), dec!(1)),
            dec!(0.02)
        );
    }
}

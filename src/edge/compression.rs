//! Edge compression near extreme prices

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Floor of the compression multiplier
pub const MIN_COMPRESSION: f64 = 0.4;

const HEALTHY_LOW_CENTS: f64 = 15.0;
const HEALTHY_HIGH_CENTS: f64 = 85.0;
const SATURATED_LOW: Decimal = dec!(0.05);
const SATURATED_HIGH: Decimal = dec!(0.95);

/// Absolute probability gap in percentage points
pub fn raw_edge(true_prob: Decimal, market_price: Decimal) -> f64 {
    let gap: f64 = (true_prob - market_price).abs().try_into().unwrap_or(0.0);
    gap * 100.0
}

/// Multiplier in [0.4, 1.0]; 1.0 anywhere in the 15¢..=85¢ band
pub fn compression_multiplier(market_price: Decimal) -> f64 {
    let cents: f64 = (market_price * dec!(100)).try_into().unwrap_or(50.0);
    if (HEALTHY_LOW_CENTS..=HEALTHY_HIGH_CENTS).contains(&cents) {
        return 1.0;
    }

    // 0 at 50¢, 1 at either extreme; penalty accelerates past 75¢ / 25¢
    let distance = (cents - 50.0).abs() / 50.0;
    let penalty = (distance - 0.5).max(0.0).powf(1.6) * 1.5;
    (1.0 - penalty).max(MIN_COMPRESSION)
}

/// Edge after extreme-price compression
pub fn compressed_edge(true_prob: Decimal, market_price: Decimal) -> f64 {
    raw_edge(true_prob, market_price) * compression_multiplier(market_price)
}

/// Priced too close to 0 or 1 for the edge to be actionable
pub fn is_saturated(market_price: Decimal) -> bool {
    market_price > SATURATED_HIGH || market_price < SATURATED_LOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_edge_percentage_points() {
        assert!((raw_edge(dec!(0.62), dec!(0.50)) - 12.0).abs() < 1e-9);
        assert!((raw_edge(dec!(0.40), dec!(0.50)) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_compression_in_healthy_band() {
        for cents in 15..=85 {
            assert_eq!(compression_multiplier(Decimal::new(cents, 2)), 1.0);
        }
    }

    #[test]
    fn test_multiplier_bounded_everywhere() {
        for cents in 1..=99 {
            let m = compression_multiplier(Decimal::new(cents, 2));
            assert!((MIN_COMPRESSION..=1.0).contains(&m), "{}¢ -> {}", cents, m);
        }
    }

    #[test]
    fn test_compression_symmetric_and_increasing_toward_extremes() {
        let m10 = compression_multiplier(dec!(0.10));
        let m90 = compression_multiplier(dec!(0.90));
        let m5 = compression_multiplier(dec!(0.05));
        assert!((m10 - m90).abs() < 1e-12);
        assert!(m5 < m10);
        assert!(m10 < 1.0);
    }

    #[test]
    fn test_compression_value_at_ten_cents() {
        // distance 0.8 -> 1 - 0.3^1.6 * 1.5
        let expected = 1.0 - 0.3f64.powf(1.6) * 1.5;
        assert!((compression_multiplier(dec!(0.10)) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_compressed_edge() {
        let edge = compressed_edge(dec!(0.30), dec!(0.10));
        let expected = 20.0 * compression_multiplier(dec!(0.10));
        assert!((edge - expected).abs() < 1e-9);
    }

    #[test]
    fn test_saturation_bounds_are_exclusive() {
        assert!(!is_saturated(dec!(0.95)));
        assert!(!is_saturated(dec!(0.05)));
        assert!(is_saturated(dec!(0.96)));
        assert!(is_saturated(dec!(0.04)));
        assert!(!is_saturated(dec!(0.50)));
    }
}

//! Signal types

use crate::indicators::Indicators;
use crate::model::ModelOutputs;
use crate::signal::patterns::Pattern;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Contract side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Pays if spot settles at or above the strike
    Yes,
    /// Pays if spot settles below the strike
    No,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Yes => Side::No,
            Side::No => Side::Yes,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Yes => write!(f, "YES"),
            Side::No => write!(f, "NO"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Side::Yes),
            "no" | "n" => Ok(Side::No),
            other => Err(format!("unknown side: {}", other)),
        }
    }
}

/// One side of a strike, scored for this cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractOption {
    pub strike: Decimal,
    pub side: Side,
    /// Modelled probability this side pays out
    pub true_prob: Decimal,
    /// Market price in [0.01, 0.99]
    pub market_price: Decimal,
    /// Compressed edge in percentage points
    pub edge: f64,
    /// Edge weighted for direction and proximity
    pub profit_potential: f64,
    pub is_saturated: bool,
}

impl ContractOption {
    /// Human-readable contract label
    pub fn description(&self) -> String {
        match self.side {
            Side::Yes => format!("YES: ${} or above", self.strike),
            Side::No => format!(
                "NO on ${} or above (= betting BELOW ${})",
                self.strike, self.strike
            ),
        }
    }

    /// Market price in whole cents
    pub fn market_cents(&self) -> Decimal {
        (self.market_price * Decimal::ONE_HUNDRED).round()
    }
}

/// Action suggested by the best contract's edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    SmallBuy,
    Wait,
}

impl Recommendation {
    /// Edge above 10 buys, above 5 buys small, otherwise wait
    pub fn from_edge(edge: f64) -> Self {
        if edge > 10.0 {
            Recommendation::Buy
        } else if edge > 5.0 {
            Recommendation::SmallBuy
        } else {
            Recommendation::Wait
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::SmallBuy => write!(f, "SMALL BUY"),
            Recommendation::Wait => write!(f, "WAIT"),
        }
    }
}

/// Timing guidance driven only by minutes left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Enter,
    HoldAndMonitor,
    ExitOrHoldThroughExpiry,
}

impl Strategy {
    pub fn from_minutes(minutes_to_expiry: f64) -> Self {
        if minutes_to_expiry > 30.0 {
            Strategy::Enter
        } else if minutes_to_expiry > 15.0 {
            Strategy::HoldAndMonitor
        } else {
            Strategy::ExitOrHoldThroughExpiry
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Enter => write!(f, "Enter position"),
            Strategy::HoldAndMonitor => write!(f, "Hold and monitor"),
            Strategy::ExitOrHoldThroughExpiry => {
                write!(f, "Prepare to exit or hold through expiry")
            }
        }
    }
}

/// Sized recommendation for the best contract this cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// Unique signal identifier
    pub id: Uuid,
    /// Selected contract
    pub contract: ContractOption,
    pub recommendation: Recommendation,
    pub strategy: Strategy,
    /// Confidence score in [0, 95]
    pub confidence: f64,
    /// Dollars to commit, whole units
    pub position_size: Decimal,
    /// (true_prob - price) * size, rounded to cents
    pub expected_value: Decimal,
    pub models: ModelOutputs,
    pub patterns: Vec<Pattern>,
    pub indicators: Indicators,
    /// Signal generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    /// Confidence rounded to a whole percent
    pub fn confidence_pct(&self) -> i64 {
        self.confidence.round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn option(side: Side) -> ContractOption {
        ContractOption {
            strike: dec!(94500),
            side,
            true_prob: dec!(0.4),
            market_price: dec!(0.30),
            edge: 10.0,
            profit_potential: 6.0,
            is_saturated: false,
        }
    }

    #[test]
    fn test_side_opposite_and_parse() {
        assert_eq!(Side::Yes.opposite(), Side::No);
        assert_eq!("YES".parse::<Side>().unwrap(), Side::Yes);
        assert_eq!("n".parse::<Side>().unwrap(), Side::No);
        assert!("maybe".parse::<Side>().is_err());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(option(Side::Yes).description(), "YES: $94500 or above");
        assert_eq!(
            option(Side::No).description(),
            "NO on $94500 or above (= betting BELOW $94500)"
        );
        assert_eq!(option(Side::Yes).market_cents(), dec!(30));
    }

    #[test]
    fn test_recommendation_thresholds() {
        assert_eq!(Recommendation::from_edge(10.5), Recommendation::Buy);
        assert_eq!(Recommendation::from_edge(10.0), Recommendation::SmallBuy);
        assert_eq!(Recommendation::from_edge(5.0), Recommendation::Wait);
        assert_eq!(Recommendation::SmallBuy.to_string(), "SMALL BUY");
    }

    #[test]
    fn test_strategy_from_minutes() {
        assert_eq!(Strategy::from_minutes(45.0), Strategy::Enter);
        assert_eq!(Strategy::from_minutes(30.0), Strategy::HoldAndMonitor);
        assert_eq!(Strategy::from_minutes(15.0), Strategy::ExitOrHoldThroughExpiry);
        assert_eq!(Strategy::Enter.to_string(), "Enter position");
    }
}

//! Price history types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single spot observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation time
    pub timestamp: DateTime<Utc>,
    /// Spot price, always positive
    pub price: Decimal,
}

impl PricePoint {
    /// Create a new price point
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self { timestamp, price }
    }

    /// Price as a float for indicator math
    pub fn price_f64(&self) -> f64 {
        f64::try_from(self.price).unwrap_or(0.0)
    }
}

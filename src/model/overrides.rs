//! Manual market price overrides
//!
//! Entries are keyed by (strike, decay rate) and hold the YES price. NO is
//! always read back as 1 - YES, so a pair can never drift out of sync.

use crate::error::{EngineError, Result};
use crate::signal::Side;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Lowest accepted override in cents
pub const MIN_CENTS: i64 = 1;
/// Highest accepted override in cents
pub const MAX_CENTS: i64 = 99;

/// Lookup key for an override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverrideKey {
    pub strike: Decimal,
    pub decay_rate: Decimal,
}

/// Engine-owned store of manually entered market prices
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    yes_prices: HashMap<OverrideKey, Decimal>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a price for `side` at `strike`; the opposite side becomes 100 - cents
    pub fn set(&mut self, strike: Decimal, decay_rate: Decimal, side: Side, cents: i64) -> Result<()> {
        if !(MIN_CENTS..=MAX_CENTS).contains(&cents) {
            return Err(EngineError::InvalidOverride(format!(
                "cents must be in [{}, {}], got {}",
                MIN_CENTS, MAX_CENTS, cents
            )));
        }
        if strike <= Decimal::ZERO {
            return Err(EngineError::InvalidOverride(format!(
                "strike must be positive, got {}",
                strike
            )));
        }

        let price = Decimal::new(cents, 2);
        let yes_price = match side {
            Side::Yes => price,
            Side::No => Decimal::ONE - price,
        };
        self.yes_prices.insert(OverrideKey { strike, decay_rate }, yes_price);
        Ok(())
    }

    /// Stored YES price, if any
    pub fn yes_price(&self, strike: Decimal, decay_rate: Decimal) -> Option<Decimal> {
        self.yes_prices
            .get(&OverrideKey { strike, decay_rate })
            .copied()
    }

    /// Stored price for either side
    pub fn price(&self, strike: Decimal, decay_rate: Decimal, side: Side) -> Option<Decimal> {
        let yes = self.yes_price(strike, decay_rate)?;
        Some(match side {
            Side::Yes => yes,
            Side::No => Decimal::ONE - yes,
        })
    }

    /// Remove the pair at `strike`, returning whether one existed
    pub fn clear(&mut self, strike: Decimal, decay_rate: Decimal) -> bool {
        self.yes_prices
            .remove(&OverrideKey { strike, decay_rate })
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.yes_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yes_prices.is_empty()
    }
}

/// Parse user-entered cents, rejecting anything but an integer in range
pub fn parse_cents(input: &str) -> Result<i64> {
    let cents: i64 = input
        .trim()
        .parse()
        .map_err(|_| EngineError::InvalidOverride(format!("not a whole number of cents: {:?}", input)))?;
    if !(MIN_CENTS..=MAX_CENTS).contains(&cents) {
        return Err(EngineError::InvalidOverride(format!(
            "cents must be in [{}, {}], got {}",
            MIN_CENTS, MAX_CENTS, cents
        )));
    }
    Ok(cents)
}

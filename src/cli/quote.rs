//! Quote command implementation

use clap::Args;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::model::{DecayPricer, OverrideStore};

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Current BTC spot price
    #[arg(long)]
    pub spot: Decimal,

    /// Contract strike
    #[arg(long)]
    pub strike: Decimal,

    /// Minutes until expiry
    #[arg(long)]
    pub minutes: f64,

    /// Base decay rate (defaults to pricing.base_decay_rate)
    #[arg(long)]
    pub decay_rate: Option<Decimal>,
}

impl QuoteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pricer = DecayPricer::new(self.decay_rate.unwrap_or(config.pricing.base_decay_rate));
        let quote = pricer.quote(self.spot, self.strike, self.minutes, &OverrideStore::new())?;

        tracing::debug!(spot = %self.spot, strike = %self.strike, minutes = self.minutes, "Quoted strike");
        println!("BTC > ${} with {} min left", self.strike, self.minutes);
        println!("  YES: {}¢", (quote.yes * Decimal::ONE_HUNDRED).normalize());
        println!("  NO:  {}¢", (quote.no * Decimal::ONE_HUNDRED).normalize());
        Ok(())
    }
}

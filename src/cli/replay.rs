//! Replay command implementation
//!
//! Input is one observation per line, either `price` or `rfc3339,price`.
//! Blank lines and `#` comments are skipped. Lines without a timestamp are
//! spaced by `signal.recompute_interval_secs`.

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Config;
use crate::engine::{Engine, EngineSnapshot, Readiness, SharedEngine};
use crate::error::EngineError;
use crate::model::parse_cents;
use crate::signal::Side;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Price file to replay
    pub file: PathBuf,

    /// Bankroll in dollars (defaults to risk.initial_bankroll)
    #[arg(long)]
    pub bankroll: Option<Decimal>,

    /// Minutes until expiry (defaults to session.time_to_expiry_minutes)
    #[arg(long)]
    pub minutes: Option<f64>,

    /// Manual market price as STRIKE:SIDE:CENTS, repeatable
    #[arg(long = "override", value_name = "STRIKE:SIDE:CENTS")]
    pub overrides: Vec<OverrideArg>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Manual market price given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideArg {
    pub strike: Decimal,
    pub side: Side,
    pub cents: i64,
}

impl FromStr for OverrideArg {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidOverride(format!("expected STRIKE:SIDE:CENTS, got {:?}", s));

        let mut parts = s.split(':');
        let (Some(strike), Some(side), Some(cents), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let strike = Decimal::from_str(strike.trim()).map_err(|_| invalid())?;
        let side = Side::from_str(side.trim()).map_err(EngineError::InvalidOverride)?;
        let cents = parse_cents(cents)?;
        Ok(Self { strike, side, cents })
    }
}

/// Parse one replay line
///
/// Returns `None` for blank and comment lines. `fallback` stamps lines that
/// carry only a price.
pub fn parse_price_line(
    line: &str,
    fallback: DateTime<Utc>,
) -> anyhow::Result<Option<(DateTime<Utc>, Decimal)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (timestamp, price) = match line.split_once(',') {
        Some((ts, price)) => {
            let ts = DateTime::parse_from_rfc3339(ts.trim())
                .with_context(|| format!("invalid timestamp {:?}", ts))?
                .with_timezone(&Utc);
            (ts, price)
        }
        None => (fallback, line),
    };

    let price = Decimal::from_str(price.trim()).with_context(|| format!("invalid price {:?}", price))?;
    Ok(Some((timestamp, price)))
}

impl ReplayArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let engine = SharedEngine::new(Engine::new(config.clone())?);

        if let Some(bankroll) = self.bankroll {
            engine.set_bankroll(bankroll).await?;
        }
        if let Some(minutes) = self.minutes {
            engine.set_time_to_expiry(minutes).await?;
        }
        for arg in &self.overrides {
            engine
                .set_manual_override(arg.strike, arg.side, arg.cents)
                .await?;
        }

        let content = tokio::fs::read_to_string(&self.file)
            .await
            .with_context(|| format!("failed to read {}", self.file.display()))?;

        let step = Duration::seconds(config.signal.recompute_interval_secs as i64);
        let mut next_ts = Utc::now();
        let mut pushed = 0usize;

        for (lineno, line) in content.lines().enumerate() {
            let Some((timestamp, price)) = parse_price_line(line, next_ts)
                .with_context(|| format!("{}:{}", self.file.display(), lineno + 1))?
            else {
                continue;
            };
            engine
                .push_price(timestamp, price)
                .await
                .with_context(|| format!("{}:{}", self.file.display(), lineno + 1))?;
            next_ts = timestamp + step;
            pushed += 1;
        }

        tracing::info!(points = pushed, file = %self.file.display(), "Replay complete");

        let snapshot = engine.snapshot().await;
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
            OutputFormat::Table => print_table(&snapshot),
        }
        Ok(())
    }
}

fn print_table(snapshot: &EngineSnapshot) {
    if let Readiness::NotReady { have, need } = snapshot.readiness {
        println!("Not enough history: {} of {} points", have, need);
        return;
    }

    if let Some(spot) = snapshot.spot {
        println!("Spot: ${}  Bankroll: ${}  Expiry: {} min", spot, snapshot.bankroll, snapshot.minutes_to_expiry);
    }
    if let Some(models) = snapshot.models {
        println!(
            "Models: trend {:.1}  feature {:.1}  direction {:?}",
            models.trend,
            models.feature,
            models.direction()
        );
    }
    if !snapshot.patterns.is_empty() {
        let names: Vec<&str> = snapshot.patterns.iter().map(|p| p.name.as_str()).collect();
        println!("Patterns: {}", names.join(", "));
    }

    if let Some(ref signal) = snapshot.signal {
        println!();
        println!("{}  {}", signal.recommendation, signal.contract.description());
        println!(
            "  edge {:.1}%  confidence {}%  size ${}  EV ${}",
            signal.contract.edge,
            signal.confidence_pct(),
            signal.position_size,
            signal.expected_value
        );
        println!("  {}", signal.strategy);
    }


    println!();
    println!("{:<12} {:<4} {:>6} {:>6} {:>8} {:>8}", "STRIKE", "SIDE", "TRUE", "MKT", "EDGE", "PROFIT");
    for c in snapshot.ranked_contracts() {
        println!(
            "{:<12} {:<4} {:>6} {:>6} {:>8.1} {:>8.1}",
            c.strike,
            c.side.to_string(),
            c.true_prob,
            c.market_price,
            c.edge,
            c.profit_potential
        );
    }
}

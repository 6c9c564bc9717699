//! Engine module
//!
//! One engine instance owns the price window, manual overrides, bankroll and
//! expiry, and recomputes every derived output whenever one of them changes.
//! A cycle is pure in-memory arithmetic over the window.

mod shared;

pub use shared::{EngineSnapshot, SharedEngine};

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::feed::PriceWindow;
use crate::indicators::Indicators;
use crate::ladder::ContractSearch;
use crate::model::{DecayPricer, ModelOutputs, OverrideStore};
use crate::risk::PositionSizer;
use crate::signal::{detect_patterns, ContractOption, Pattern, Side, Signal, SignalSynthesizer};
use crate::telemetry::{record_cycle_latency, set_gauge, GaugeMetric};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Whether the engine has enough history to produce a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Readiness {
    NotReady { have: usize, need: usize },
    Ready,
}

/// Mispricing engine for one strike ladder
pub struct Engine {
    config: Config,
    window: PriceWindow,
    overrides: OverrideStore,
    pricer: DecayPricer,
    synthesizer: SignalSynthesizer,
    bankroll: Decimal,
    minutes_to_expiry: f64,
    indicators: Indicators,
    patterns: Vec<Pattern>,
    models: Option<ModelOutputs>,
    contracts: Vec<ContractOption>,
    signal: Option<Signal>,
}

impl Engine {
    /// Create an engine from validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an engine with default configuration
    pub fn with_defaults() -> Self {
        Self::build(Config::default())
    }

    fn build(config: Config) -> Self {
        Self {
            window: PriceWindow::new(config.history.capacity),
            overrides: OverrideStore::new(),
            pricer: DecayPricer::new(config.pricing.base_decay_rate),
            synthesizer: SignalSynthesizer::new(PositionSizer::from_config(&config.risk)),
            bankroll: config.risk.initial_bankroll,
            minutes_to_expiry: config.session.time_to_expiry_minutes,
            indicators: Indicators::neutral(0.0),
            patterns: Vec::new(),
            models: None,
            contracts: Vec::new(),
            signal: None,
            config,
        }
    }

    /// Append a spot observation and recompute
    pub fn push_price(&mut self, timestamp: DateTime<Utc>, price: Decimal) -> Result<()> {
        if let Some(last) = self.window.latest() {
            if timestamp < last.timestamp {
                tracing::warn!(
                    %timestamp,
                    last = %last.timestamp,
                    "Price point older than window head"
                );
            }
        }
        if let Err(e) = self.window.push(timestamp, price) {
            tracing::warn!(%price, error = %e, "Rejected price point");
            return Err(e);
        }
        self.recompute()
    }

    /// Set a manual market price for one side of `strike`
    ///
    /// The opposite side reads back as 100 - cents. Invalid input leaves the
    /// store untouched.
    pub fn set_manual_override(&mut self, strike: Decimal, side: Side, cents: i64) -> Result<()> {
        if let Err(e) = self
            .overrides
            .set(strike, self.pricer.base_decay_rate(), side, cents)
        {
            tracing::warn!(%strike, %side, cents, error = %e, "Rejected manual override");
            return Err(e);
        }
        tracing::info!(%strike, %side, cents, "Manual override set");
        self.recompute()
    }

    /// Drop the manual price pair at `strike`
    pub fn clear_manual_override(&mut self, strike: Decimal) -> Result<bool> {
        let removed = self
            .overrides
            .clear(strike, self.pricer.base_decay_rate());
        if removed {
            self.recompute()?;
        }
        Ok(removed)
    }

    pub fn set_bankroll(&mut self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            tracing::warn!(%amount, "Rejected bankroll");
            return Err(EngineError::InvalidInput(format!(
                "bankroll must not be negative, got {}",
                amount
            )));
        }
        self.bankroll = amount;
        self.recompute()
    }

    pub fn set_time_to_expiry(&mut self, minutes: f64) -> Result<()> {
        if !minutes.is_finite() || minutes <= 0.0 {
            tracing::warn!(minutes, "Rejected time to expiry");
            return Err(EngineError::InvalidInput(format!(
                "minutes to expiry must be positive, got {}",
                minutes
            )));
        }
        self.minutes_to_expiry = minutes;
        self.recompute()
    }

    /// Run one full cycle over the current window
    ///
    /// Outputs are committed together. A failed search leaves this cycle's
    /// indicators in place with no contracts and no signal.
    pub fn recompute(&mut self) -> Result<()> {
        let started = Instant::now();

        let Some(spot) = self.window.latest().map(|p| p.price) else {
            self.indicators = Indicators::neutral(0.0);
            self.patterns.clear();
            self.models = None;
            self.contracts.clear();
            self.signal = None;
            return Ok(());
        };

        let prices = self.window.prices();
        let spot_f: f64 = spot.try_into().unwrap_or(0.0);
        let indicators = Indicators::compute(&prices, spot_f);
        let patterns = detect_patterns(&indicators, &prices);
        let models = ModelOutputs::evaluate(&prices, &indicators, &patterns);

        set_gauge(GaugeMetric::HistoryLength, prices.len() as f64);

        let outcome = match self.readiness() {
            Readiness::NotReady { have, need } => {
                tracing::debug!(have, need, "Waiting for price history");
                Ok((Vec::new(), None))
            }
            Readiness::Ready => self.search(spot, models, &patterns, indicators),
        };

        let (contracts, signal, result) = match outcome {
            Ok((contracts, signal)) => (contracts, signal, Ok(())),
            Err(e) => {
                tracing::warn!(%spot, error = %e, "Contract search failed");
                (Vec::new(), None, Err(e))
            }
        };

        if let Some(ref new) = signal {
            let changed = self.signal.as_ref().map_or(true, |old| {
                old.contract.strike != new.contract.strike
                    || old.contract.side != new.contract.side
                    || old.recommendation != new.recommendation
            });
            if changed {
                tracing::info!(
                    contract = %new.contract.description(),
                    recommendation = %new.recommendation,
                    edge = new.contract.edge,
                    confidence = new.confidence_pct(),
                    size = %new.position_size,
                    "Recommendation changed"
                );
            }
            set_gauge(GaugeMetric::BestEdge, new.contract.edge);
            set_gauge(GaugeMetric::Confidence, new.confidence);
            set_gauge(
                GaugeMetric::PositionSize,
                new.position_size.try_into().unwrap_or(0.0),
            );
        }
        set_gauge(GaugeMetric::LadderSize, contracts.len() as f64);

        tracing::debug!(
            %spot,
            rsi = indicators.rsi,
            trend = models.trend,
            feature = models.feature,
            contracts = contracts.len(),
            "Cycle complete"
        );

        self.indicators = indicators;
        self.patterns = patterns;
        self.models = Some(models);
        self.contracts = contracts;
        self.signal = signal;

        record_cycle_latency(started.elapsed());
        result
    }

    /// Price the ladder and size the best contract
    fn search(
        &self,
        spot: Decimal,
        models: ModelOutputs,
        patterns: &[Pattern],
        indicators: Indicators,
    ) -> Result<(Vec<ContractOption>, Option<Signal>)> {
        let search = ContractSearch::new(
            &self.pricer,
            &self.overrides,
            &self.config.ladder,
            self.config.signal.min_edge,
        )
        .run(spot, self.minutes_to_expiry, &models)?;

        let signal = search.best.as_ref().map(|best| {
            self.synthesizer.synthesize(
                best,
                models,
                patterns.to_vec(),
                indicators,
                self.bankroll,
                self.minutes_to_expiry,
            )
        });
        Ok((search.options, signal))
    }

    pub fn readiness(&self) -> Readiness {
        let have = self.window.len();
        let need = self.config.history.min_points_for_signal;
        if have < need {
            Readiness::NotReady { have, need }
        } else {
            Readiness::Ready
        }
    }

    /// Signal from the latest cycle, `None` until enough history exists
    pub fn signal(&self) -> Option<&Signal> {
        self.signal.as_ref()
    }

    /// Full ladder from the latest cycle, in generation order
    pub fn contracts(&self) -> &[ContractOption] {
        &self.contracts
    }

    /// Non-saturated contracts, highest profit potential first
    pub fn ranked_contracts(&self) -> Vec<&ContractOption> {
        rank_contracts(&self.contracts)
    }

    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn models(&self) -> Option<&ModelOutputs> {
        self.models.as_ref()
    }

    /// Latest spot price
    pub fn spot(&self) -> Option<Decimal> {
        self.window.latest().map(|p| p.price)
    }

    pub fn history(&self) -> &PriceWindow {
        &self.window
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    pub fn bankroll(&self) -> Decimal {
        self.bankroll
    }

    pub fn minutes_to_expiry(&self) -> f64 {
        self.minutes_to_expiry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Owned copy of the latest cycle outputs
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            readiness: self.readiness(),
            spot: self.spot(),
            bankroll: self.bankroll,
            minutes_to_expiry: self.minutes_to_expiry,
            signal: self.signal.clone(),
            contracts: self.contracts.clone(),
            indicators: self.indicators,
            patterns: self.patterns.clone(),
            models: self.models,
        }
    }
}

/// Non-saturated contracts, highest profit potential first
///
/// The sort is stable, so ties keep ladder order.
pub fn rank_contracts(contracts: &[ContractOption]) -> Vec<&ContractOption> {
    let mut ranked: Vec<&ContractOption> = contracts.iter().filter(|c| !c.is_saturated).collect();
    ranked.sort_by(|a, b| b.profit_potential.total_cmp(&a.profit_potential));
    ranked
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

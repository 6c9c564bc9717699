//! Configuration types for strike-edge

use crate::error::EngineError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub ladder: LadderConfig,
    #[serde(default)]
    pub signal: SignalConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Price window configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Most recent points kept; older points are evicted
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Points required before a signal is produced
    #[serde(default = "default_min_points")]
    pub min_points_for_signal: usize,
}

fn default_capacity() -> usize {
    30
}
fn default_min_points() -> usize {
    10
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 30,
            min_points_for_signal: 10,
        }
    }
}

/// Binary option pricer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Base exponential decay rate, also the key for manual overrides
    #[serde(default = "default_decay_rate")]
    pub base_decay_rate: Decimal,
}

fn default_decay_rate() -> Decimal {
    Decimal::new(5, 0)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_decay_rate: Decimal::new(5, 0),
        }
    }
}

/// Strike ladder configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LadderConfig {
    /// Distance between adjacent strikes
    #[serde(default = "default_increment")]
    pub increment: Decimal,

    /// Strikes generated on each side of the rounded spot
    #[serde(default = "default_range")]
    pub range: u32,

    /// Strikes appended above the ladder when its top is still live
    #[serde(default = "default_extension_steps")]
    pub extension_steps: u32,

    /// Distance from spot over which the proximity bonus fades to zero
    #[serde(default = "default_proximity_window")]
    pub proximity_window: Decimal,
}

fn default_increment() -> Decimal {
    Decimal::new(250, 0)
}
fn default_range() -> u32 {
    4
}
fn default_extension_steps() -> u32 {
    2
}
fn default_proximity_window() -> Decimal {
    Decimal::new(500, 0)
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            increment: Decimal::new(250, 0),
            range: 4,
            extension_steps: 2,
            proximity_window: Decimal::new(500, 0),
        }
    }
}

/// Contract selection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignalConfig {
    /// Minimum compressed edge (percentage points) for a candidate
    #[serde(default = "default_min_edge")]
    pub min_edge: f64,

    /// Advisory recompute cadence for the host scheduler
    #[serde(default = "default_recompute_interval")]
    pub recompute_interval_secs: u64,
}

fn default_min_edge() -> f64 {
    3.0
}
fn default_recompute_interval() -> u64 {
    30
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            min_edge: 3.0,
            recompute_interval_secs: 30,
        }
    }
}

/// Position sizing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RiskConfig {
    /// Starting bankroll in dollars
    #[serde(default = "default_bankroll")]
    pub initial_bankroll: Decimal,

    /// Largest share of bankroll a single position may use
    #[serde(default = "default_max_bet_fraction")]
    pub max_bet_fraction: f64,

    /// Cap on the edge-driven size multiplier
    #[serde(default = "default_max_edge_multiplier")]
    pub max_edge_multiplier: f64,
}

fn default_bankroll() -> Decimal {
    Decimal::new(100, 0)
}
fn default_max_bet_fraction() -> f64 {
    0.5
}
fn default_max_edge_multiplier() -> f64 {
    1.5
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            initial_bankroll: Decimal::new(100, 0),
            max_bet_fraction: 0.5,
            max_edge_multiplier: 1.5,
        }
    }
}

/// Contract session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Minutes until the contracts resolve
    #[serde(default = "default_time_to_expiry")]
    pub time_to_expiry_minutes: f64,
}

fn default_time_to_expiry() -> f64 {
    45.0
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_to_expiry_minutes: 45.0,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: &str| Err(EngineError::InvalidConfig(msg.to_string()));

        if self.history.min_points_for_signal == 0 {
            return invalid("history.min_points_for_signal must be at least 1");
        }
        if self.history.capacity < self.history.min_points_for_signal {
            return invalid("history.capacity must be >= history.min_points_for_signal");
        }
        if self.pricing.base_decay_rate <= Decimal::ZERO {
            return invalid("pricing.base_decay_rate must be positive");
        }
        if self.ladder.increment <= Decimal::ZERO {
            return invalid("ladder.increment must be positive");
        }
        if self.ladder.range == 0 {
            return invalid("ladder.range must be at least 1");
        }
        if self.ladder.proximity_window <= Decimal::ZERO {
            return invalid("ladder.proximity_window must be positive");
        }
        let minutes = self.session.time_to_expiry_minutes;
        if minutes.is_nan() || minutes <= 0.0 {
            return invalid("session.time_to_expiry_minutes must be positive");
        }
        if self.risk.initial_bankroll < Decimal::ZERO {
            return invalid("risk.initial_bankroll must not be negative");
        }
        Ok(())
    }
}

//! Shared engine handle for concurrent hosts

use super::{rank_contracts, Engine, Readiness};
use crate::error::Result;
use crate::indicators::Indicators;
use crate::model::ModelOutputs;
use crate::signal::{ContractOption, Pattern, Side, Signal};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Outputs of one cycle, taken under a single read lock
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub readiness: Readiness,
    pub spot: Option<Decimal>,
    pub bankroll: Decimal,
    pub minutes_to_expiry: f64,
    pub signal: Option<Signal>,
    pub contracts: Vec<ContractOption>,
    pub indicators: Indicators,
    pub patterns: Vec<Pattern>,
    pub models: Option<ModelOutputs>,
}

impl EngineSnapshot {
    /// Non-saturated contracts, highest profit potential first
    pub fn ranked_contracts(&self) -> Vec<&ContractOption> {
        rank_contracts(&self.contracts)
    }
}

/// Cloneable handle over one engine
///
/// Mutations take the write lock and recompute before releasing it, so a
/// reader never sees inputs from one cycle next to outputs from another.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub async fn push_price(&self, timestamp: DateTime<Utc>, price: Decimal) -> Result<()> {
        self.inner.write().await.push_price(timestamp, price)
    }

    pub async fn set_manual_override(&self, strike: Decimal, side: Side, cents: i64) -> Result<()> {
        self.inner
            .write()
            .await
            .set_manual_override(strike, side, cents)
    }

    pub async fn clear_manual_override(&self, strike: Decimal) -> Result<bool> {
        self.inner.write().await.clear_manual_override(strike)
    }

    pub async fn set_bankroll(&self, amount: Decimal) -> Result<()> {
        self.inner.write().await.set_bankroll(amount)
    }

    pub async fn set_time_to_expiry(&self, minutes: f64) -> Result<()> {
        self.inner.write().await.set_time_to_expiry(minutes)
    }

    pub async fn signal(&self) -> Option<Signal> {
        self.inner.read().await.signal().cloned()
    }

    pub async fn snapshot(&self) -> EngineSnapshot {
        self.inner.read().await.snapshot()
    }

    /// Run `f` against the engine under the read lock
    pub async fn read<R>(&self, f: impl FnOnce(&Engine) -> R) -> R {
        let engine = self.inner.read().await;
        f(&engine)
    }
}

//! Signal synthesis
//!
//! Combines the selected contract with model agreement and pattern count into
//! a confidence score, then sizes the position.

use super::patterns::Pattern;
use super::{ContractOption, Recommendation, Signal, Strategy};
use crate::indicators::Indicators;
use crate::model::ModelOutputs;
use crate::risk::{expected_value, PositionSizer};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Confidence never exceeds this
pub const MAX_CONFIDENCE: f64 = 95.0;

const PATTERN_POINTS: f64 = 5.0;
const MAX_PATTERN_CONFIDENCE: f64 = 20.0;
const AGREEMENT_WEIGHT: f64 = 0.6;
const PATTERN_WEIGHT: f64 = 0.4;
const EDGE_WEIGHT: f64 = 0.5;

/// Five points per pattern, capped at 20
pub fn pattern_confidence(pattern_count: usize) -> f64 {
    (pattern_count as f64 * PATTERN_POINTS).min(MAX_PATTERN_CONFIDENCE)
}

/// Blend of model agreement, pattern support and edge
pub fn confidence(models: &ModelOutputs, pattern_count: usize, edge: f64) -> f64 {
    let base = models.agreement() * AGREEMENT_WEIGHT + pattern_confidence(pattern_count) * PATTERN_WEIGHT;
    (base + edge * EDGE_WEIGHT).min(MAX_CONFIDENCE)
}

/// Turns the best contract of a cycle into a sized signal
#[derive(Debug, Clone, Default)]
pub struct SignalSynthesizer {
    sizer: PositionSizer,
}

impl SignalSynthesizer {
    pub fn new(sizer: PositionSizer) -> Self {
        Self { sizer }
    }

    pub fn synthesize(
        &self,
        best: &ContractOption,
        models: ModelOutputs,
        patterns: Vec<Pattern>,
        indicators: Indicators,
        bankroll: Decimal,
        minutes_to_expiry: f64,
    ) -> Signal {
        let confidence = confidence(&models, patterns.len(), best.edge);
        let position_size = self.sizer.size(confidence, best.edge, bankroll);
        let expected_value = expected_value(best.true_prob, best.market_price, position_size);

        Signal {
            id: Uuid::new_v4(),
            contract: best.clone(),
            recommendation: Recommendation::from_edge(best.edge),
            strategy: Strategy::from_minutes(minutes_to_expiry),
            confidence,
            position_size,
            expected_value,
            models,
            patterns,
            indicators,
            timestamp: Utc::now(),
        }
    }
}

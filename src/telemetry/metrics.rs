//! Engine metrics
//!
//! Recorded through the `metrics` facade. Without an installed recorder the
//! calls are no-ops.

use std::time::Duration;

const CYCLE_LATENCY: &str = "strike_edge_cycle_latency_ms";

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Compressed edge of the selected contract
    BestEdge,
    /// Signal confidence
    Confidence,
    /// Recommended position in dollars
    PositionSize,
    /// Contracts evaluated in the last cycle
    LadderSize,
    /// Points held in the price window
    HistoryLength,
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::BestEdge => "strike_edge_best_edge_pct",
            GaugeMetric::Confidence => "strike_edge_confidence",
            GaugeMetric::PositionSize => "strike_edge_position_size_usd",
            GaugeMetric::LadderSize => "strike_edge_ladder_size",
            GaugeMetric::HistoryLength => "strike_edge_history_length",
        }
    }
}

/// Record how long one engine cycle took
pub fn record_cycle_latency(duration: Duration) {
    metrics::histogram!(CYCLE_LATENCY).record(duration.as_secs_f64() * 1000.0);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    metrics::gauge!(metric.name()).set(value);
}

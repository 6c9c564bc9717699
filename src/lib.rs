//! strike-edge: Mispricing and position-sizing engine for BTC strike-ladder binary contracts
//!
//! This library provides the core components for:
//! - A bounded window of BTC spot observations
//! - Technical indicators and pattern detection over that window
//! - Trend and feature predictors blended into a market direction
//! - Time-decay pricing of binary strikes with manual market overrides
//! - Compressed edge and profit potential across a strike ladder
//! - Confidence-scaled position sizing and signal synthesis
//! - Structured logging and engine metrics

pub mod cli;
pub mod config;
pub mod edge;
pub mod engine;
pub mod error;
pub mod feed;
pub mod indicators;
pub mod ladder;
pub mod model;
pub mod risk;
pub mod signal;
pub mod telemetry;

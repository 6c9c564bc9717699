//! Signal module
//!
//! Pattern detection, scored contract options, and the sized signal that
//! summarises each cycle.

pub mod patterns;
mod synthesizer;
mod types;

pub use patterns::{detect_patterns, Pattern, PatternBias};
pub use synthesizer::{confidence, pattern_confidence, SignalSynthesizer, MAX_CONFIDENCE};
pub use types::{ContractOption, Recommendation, Side, Signal, Strategy};

//! Edge module
//!
//! Turns a true-probability estimate and a market price into a
//! compression-adjusted edge, a saturation flag, and a direction-aware
//! profit score.

mod compression;
mod profit;

pub use compression::{
    compressed_edge, compression_multiplier, is_saturated, raw_edge, MIN_COMPRESSION,
};
pub use profit::{profit_multiplier, ProfitWeighting};
